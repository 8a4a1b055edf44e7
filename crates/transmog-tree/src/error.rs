use thiserror::Error;

use crate::{NodeId, SyntaxKind};

/// A structural edit whose assumptions about the tree's shape do not hold.
///
/// Edits are not transactional: when an error is returned after some links
/// were already changed, the tree should be discarded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("node {0:?} has no parent")]
    Detached(NodeId),

    #[error("no {kind:?} encloses node {node:?}")]
    NoEnclosing { kind: SyntaxKind, node: NodeId },

    #[error("node {parent:?} has no {kind:?} child")]
    MissingChild { parent: NodeId, kind: SyntaxKind },

    #[error("variable {0:?} is never assigned")]
    NoAssignment(NodeId),

    #[error("no statement encloses node {0:?}")]
    NoStatement(NodeId),

    #[error("node {keep:?} does not follow {start:?} in its sibling list")]
    NotAFollowingSibling { start: NodeId, keep: NodeId },
}

/// A disagreement between the forward and backward links of a tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("node {node:?} is a child of {expected:?} but its parent link is {found:?}")]
    Parent { node: NodeId, expected: NodeId, found: Option<NodeId> },

    #[error("node {node:?} should have previous sibling {expected:?}, found {found:?}")]
    PrevSibling { node: NodeId, expected: Option<NodeId>, found: Option<NodeId> },

    #[error("sibling links below {node:?} form a cycle")]
    Cycle { node: NodeId },
}
