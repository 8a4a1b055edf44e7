//! Source files as seen by the parser driver.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;
use std::{fmt, fs, io};

use camino::{Utf8Path, Utf8PathBuf};
pub use line_index::LineIndex;
use tracing::trace;

/// A file's text together with its line index.
pub struct SourceFile {
    path: Utf8PathBuf,
    text: String,
    line_index: LineIndex,
}

impl SourceFile {
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self { path: path.into(), text, line_index }
    }

    pub fn read(path: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("text_len", &self.text.len())
            .finish_non_exhaustive()
    }
}

/// A path paired with the time it was last parsed.
///
/// Equality, ordering and hashing only look at the path, so a set of
/// `ParserFile`s can be queried by `&Utf8Path`.
#[derive(Clone, Debug)]
pub struct ParserFile {
    path: Utf8PathBuf,
    last_parsed: Option<SystemTime>,
}

impl ParserFile {
    /// A file that has never been parsed, and so is out of date.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into(), last_parsed: None }
    }

    pub fn with_last_parsed(path: impl Into<Utf8PathBuf>, last_parsed: SystemTime) -> Self {
        Self { path: path.into(), last_parsed: Some(last_parsed) }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn last_parsed(&self) -> Option<SystemTime> {
        self.last_parsed
    }

    pub fn update(&mut self, timestamp: SystemTime) {
        self.last_parsed = Some(timestamp);
    }

    pub fn mark_parsed_now(&mut self) {
        self.update(SystemTime::now());
    }

    /// `true` when the file changed on disk after it was last parsed.
    ///
    /// Files that were never parsed, or whose modification time cannot be
    /// read (deleted, unreadable), are out of date.
    pub fn is_out_of_date(&self) -> bool {
        let Some(last_parsed) = self.last_parsed else { return true };
        match fs::metadata(&self.path).and_then(|metadata| metadata.modified()) {
            Ok(modified) => modified > last_parsed,
            Err(error) => {
                trace!(path = %self.path, %error, "cannot read modification time");
                true
            }
        }
    }
}

impl PartialEq for ParserFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ParserFile {}

impl PartialOrd for ParserFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParserFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl Hash for ParserFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path().hash(state);
    }
}

impl Borrow<Utf8Path> for ParserFile {
    fn borrow(&self) -> &Utf8Path {
        &self.path
    }
}
