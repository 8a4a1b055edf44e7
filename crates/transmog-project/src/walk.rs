use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use crate::ProjectError;

/// Every file below `dir` whose extension is `extension`, sorted by path.
pub fn source_files(dir: &Utf8Path, extension: &str) -> Result<Vec<Utf8PathBuf>, ProjectError> {
    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path =
            Utf8PathBuf::from_path_buf(entry.into_path()).map_err(ProjectError::NonUtf8Path)?;
        if path.extension() == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
