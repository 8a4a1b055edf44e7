//! Mutable syntax tree for source-to-source refactoring.
//!
//! Nodes live in one arena per whole-program tree and link to their parent,
//! both siblings and their first child. Parsers build raw subtrees with a
//! [`Builder`]; [`SyntaxTree::attach_file`] links them under the root and
//! computes spans. Refactorings then rewrite the tree through an [`Editor`],
//! which records which files need to be written back.

mod arena;
mod builder;
mod clone;
mod dump;
mod editor;
mod error;
mod finish;
mod iter;
mod syntax_kind;
mod syntax_set;
mod tree;
mod utils;

pub use arena::Key;
/// Incremental builder for raw parser output.
pub use builder::Builder;
/// Structural edits with dirty-file tracking.
pub use editor::{Editor, Rhs};
pub use error::{EditError, LinkError};
pub use iter::{Ancestors, Children, DotIter, Preorder, WalkEvent};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::{STATEMENT_KINDS, SyntaxSet};
pub use tree::{DefinitionRef, FileId, NodeData, NodeId, ScopeRef, SyntaxTree};
pub use utils::{
    column_of, dotted_name, line_of, locate_file_node, merge_file_trees, replace_across_trees,
    report, structurally_eq,
};
