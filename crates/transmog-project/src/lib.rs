//! Batch driver: walks a source directory, parses every file into one
//! [`SyntaxTree`](transmog_tree::SyntaxTree) and keeps it in sync with the
//! files on disk.

mod error;
mod project;
mod walk;

pub use error::ProjectError;
pub use project::{LoadOptions, LoadReport, ParseFailure, Project, SourceParser};
pub use walk::source_files;
