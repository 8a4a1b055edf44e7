use std::collections::BTreeSet;
use std::time::SystemTime;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};
use transmog_errors::{Diagnostic, Renderer};
use transmog_inputs::{ParserFile, SourceFile};
use transmog_tree::{Editor, NodeId, SyntaxTree, locate_file_node, merge_file_trees};

use crate::{ProjectError, source_files};

/// A parser front end producing raw file subtrees.
pub trait SourceParser {
    /// Parses `text` into `tree` and returns the unattached file node.
    ///
    /// Only forward links need to be set, as a [`transmog_tree::Builder`]
    /// does. The file node is attached and finished by the caller.
    fn parse(
        &mut self,
        path: &Utf8Path,
        text: &str,
        tree: &mut SyntaxTree,
    ) -> Result<NodeId, Diagnostic>;
}

impl<F> SourceParser for F
where
    F: FnMut(&Utf8Path, &str, &mut SyntaxTree) -> Result<NodeId, Diagnostic>,
{
    fn parse(
        &mut self,
        path: &Utf8Path,
        text: &str,
        tree: &mut SyntaxTree,
    ) -> Result<NodeId, Diagnostic> {
        self(path, text, tree)
    }
}

#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Extension of the files to parse, with or without the leading dot.
    pub extension: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { extension: "java".to_owned() }
    }
}

#[derive(Debug)]
pub struct ParseFailure {
    pub file: SourceFile,
    pub diagnostic: Diagnostic,
}

impl ParseFailure {
    pub fn path(&self) -> &Utf8Path {
        self.file.path()
    }

    pub fn render(&self, renderer: &Renderer) -> String {
        self.diagnostic.render(renderer, self.file.path().as_str(), self.file.text()).to_string()
    }
}

/// Outcome of [`Project::load`] and [`Project::refresh`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub parsed: Vec<Utf8PathBuf>,
    pub removed: Vec<Utf8PathBuf>,
    pub failures: Vec<ParseFailure>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A directory of sources parsed into one whole-program tree.
#[derive(Debug)]
pub struct Project {
    dir: Utf8PathBuf,
    options: LoadOptions,
    tree: SyntaxTree,
    files: BTreeSet<ParserFile>,
}

impl Project {
    /// Parses every source file below `dir`.
    ///
    /// Files that fail to parse are reported and left out of the tree; they
    /// stay out of date so the next [`refresh`](Self::refresh) retries them.
    pub fn load(
        dir: impl Into<Utf8PathBuf>,
        options: LoadOptions,
        parser: &mut impl SourceParser,
    ) -> Result<(Self, LoadReport), ProjectError> {
        let mut project =
            Self { dir: dir.into(), options, tree: SyntaxTree::new(), files: BTreeSet::new() };
        let mut report = LoadReport::default();

        for path in source_files(&project.dir, &project.options.extension)? {
            let parsed_at = SystemTime::now();
            let file = read(&path)?;
            if let Some(node) = parse_file(parser, &mut project.tree, file, &mut report) {
                project.tree.attach_file(node);
                project.files.insert(ParserFile::with_last_parsed(path, parsed_at));
            } else {
                project.files.insert(ParserFile::new(path));
            }
        }

        info!(
            dir = %project.dir,
            parsed = report.parsed.len(),
            failed = report.failures.len(),
            "loaded project"
        );
        Ok((project, report))
    }

    /// Reparses the files that changed on disk and folds them into the tree.
    ///
    /// New files are parsed as well, and files that disappeared are
    /// detached from the tree.
    ///
    /// Replaced file subtrees stay allocated in the tree's arena. Call
    /// [`compact`](Self::compact) to reclaim them.
    pub fn refresh(&mut self, parser: &mut impl SourceParser) -> Result<LoadReport, ProjectError> {
        let current = source_files(&self.dir, &self.options.extension)?;
        let mut report = LoadReport::default();

        let removed = self
            .files
            .iter()
            .filter(|file| {
                current.binary_search_by(|path| path.as_path().cmp(file.path())).is_err()
            })
            .map(|file| file.path().to_owned())
            .collect::<Vec<_>>();
        for path in removed {
            if let Some(node) = locate_file_node(&self.tree, &path) {
                self.tree.unlink(node);
            }
            self.files.remove(path.as_path());
            debug!(%path, "removed file");
            report.removed.push(path);
        }

        let mut fresh = SyntaxTree::new();
        let mut reparsed = Vec::new();
        for path in current {
            if self.files.get(path.as_path()).is_some_and(|file| !file.is_out_of_date()) {
                continue;
            }
            let parsed_at = SystemTime::now();
            let file = read(&path)?;
            match parse_file(parser, &mut fresh, file, &mut report) {
                Some(node) => {
                    fresh.attach_file(node);
                    reparsed.push(ParserFile::with_last_parsed(path, parsed_at));
                }
                None => {
                    self.files.replace(ParserFile::new(path));
                }
            }
        }

        merge_file_trees(&fresh, &mut self.tree);
        for file in reparsed {
            self.files.replace(file);
        }

        info!(
            parsed = report.parsed.len(),
            removed = report.removed.len(),
            failed = report.failures.len(),
            "refreshed project"
        );
        Ok(report)
    }

    /// Rebuilds the tree from the attached files, dropping every detached
    /// node. Node ids taken before the call no longer refer to this tree.
    pub fn compact(&mut self) {
        let mut tree = SyntaxTree::new();
        for file in self.tree.children(self.tree.root()) {
            let copy = tree.import_subtree(&self.tree, file);
            tree.attach_file(copy);
        }
        debug!(before = self.tree.node_count(), after = tree.node_count(), "compacted tree");
        self.tree = tree;
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SyntaxTree {
        &mut self.tree
    }

    pub fn editor(&mut self) -> Editor<'_> {
        Editor::new(&mut self.tree)
    }

    pub fn files(&self) -> impl Iterator<Item = &ParserFile> {
        self.files.iter()
    }

    pub fn file_node(&self, path: &Utf8Path) -> Option<NodeId> {
        locate_file_node(&self.tree, path)
    }

    /// Files changed on disk since they were last parsed.
    pub fn stale_files(&self) -> Vec<&Utf8Path> {
        self.files.iter().filter(|file| file.is_out_of_date()).map(ParserFile::path).collect()
    }

    /// Files edited in the tree and not yet saved.
    pub fn dirty_files(&self) -> Vec<&Utf8Path> {
        let mut files = self
            .tree
            .children(self.tree.root())
            .filter(|&file| self.tree.is_dirty(file))
            .filter_map(|file| self.tree.file(file))
            .collect::<Vec<_>>();
        files.sort();
        files
    }

    /// Records that the embedding application wrote `path` back to disk.
    ///
    /// Returns `false` if the project has no such file.
    pub fn mark_saved(&mut self, path: &Utf8Path) -> bool {
        let Some(node) = self.file_node(path) else { return false };
        self.tree.mark_clean(node);
        if let Some(mut file) = self.files.take(path) {
            file.mark_parsed_now();
            self.files.insert(file);
        }
        debug!(%path, "saved");
        true
    }
}

fn read(path: &Utf8Path) -> Result<SourceFile, ProjectError> {
    SourceFile::read(path).map_err(|source| ProjectError::Io { path: path.to_owned(), source })
}

/// Parses `file` into `tree`, tagging the result with the file's path.
fn parse_file(
    parser: &mut impl SourceParser,
    tree: &mut SyntaxTree,
    file: SourceFile,
    report: &mut LoadReport,
) -> Option<NodeId> {
    match parser.parse(file.path(), file.text(), tree) {
        Ok(node) => {
            if tree.file_id(node).is_none() {
                let id = tree.intern_file(file.path());
                tree.set_file(node, Some(id));
            }
            report.parsed.push(file.path().to_owned());
            Some(node)
        }
        Err(diagnostic) => {
            let position = diagnostic.position();
            warn!(path = %file.path(), ?position, %diagnostic, "parse failed");
            report.failures.push(ParseFailure { file, diagnostic });
            None
        }
    }
}
