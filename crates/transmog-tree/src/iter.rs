use crate::{NodeId, SyntaxKind, SyntaxTree};

/// Walks a sibling list through `next_sibling` links.
#[derive(Clone)]
pub struct Children<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl<'t> Children<'t> {
    pub(crate) fn new(tree: &'t SyntaxTree, first: Option<NodeId>) -> Self {
        Self { tree, next: first }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Walks `parent` links up to the root.
#[derive(Clone)]
pub struct Ancestors<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl<'t> Ancestors<'t> {
    pub(crate) fn new(tree: &'t SyntaxTree, first: Option<NodeId>) -> Self {
        Self { tree, next: first }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Yields the name components of a dotted-name chain from left to right.
///
/// `a.b.c` parses as `DOT(DOT(a, b), c)`; this yields `a`, `b`, `c`. Any
/// node that is not a `DOT` is a component, including one passed directly.
pub struct DotIter<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> DotIter<'t> {
    pub fn new(tree: &'t SyntaxTree, node: NodeId) -> Self {
        Self { tree, stack: vec![node] }
    }
}

impl Iterator for DotIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if self.tree.kind(node) != SyntaxKind::DOT {
                return Some(node);
            }
            let start = self.stack.len();
            self.stack.extend(self.tree.children(node));
            self.stack[start..].reverse();
        }
        None
    }
}

/// Depth-first walk over a subtree, reporting both entry and exit.
///
/// Only forward links are followed, so the walk also works on a raw tree
/// that has not been through the finishing pass.
pub struct Preorder<'t> {
    tree: &'t SyntaxTree,
    start: NodeId,
    next: Option<WalkEvent>,
    entered: Vec<NodeId>,
    skip_subtree: bool,
}

impl<'t> Preorder<'t> {
    pub(crate) fn new(tree: &'t SyntaxTree, start: NodeId) -> Self {
        Self {
            tree,
            start,
            next: Some(WalkEvent::Enter(start)),
            entered: Vec::new(),
            skip_subtree: false,
        }
    }

    /// Skips the children of the node that was entered last.
    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }
}

impl Iterator for Preorder<'_> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.skip_subtree {
            if let (Some(WalkEvent::Enter(_)), Some(&current)) = (self.next, self.entered.last()) {
                self.next = Some(WalkEvent::Leave(current));
            }
            self.skip_subtree = false;
        }

        let event = self.next.take()?;

        self.next = match event {
            WalkEvent::Enter(node) => {
                self.entered.push(node);
                match self.tree.first_child(node) {
                    Some(child) => Some(WalkEvent::Enter(child)),
                    None => Some(WalkEvent::Leave(node)),
                }
            }
            WalkEvent::Leave(node) => {
                self.entered.pop();
                if node == self.start {
                    None
                } else {
                    match self.tree.next_sibling(node) {
                        Some(sibling) => Some(WalkEvent::Enter(sibling)),
                        None => self.entered.last().map(|&parent| WalkEvent::Leave(parent)),
                    }
                }
            }
        };

        Some(event)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkEvent {
    Enter(NodeId),
    Leave(NodeId),
}
