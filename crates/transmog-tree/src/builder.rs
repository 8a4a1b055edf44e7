//! Raw-tree construction for parser front ends.

use camino::Utf8Path;

use crate::tree::FileId;
use crate::{NodeId, SyntaxKind, SyntaxTree};

struct Opened {
    node: NodeId,
    last_child: Option<NodeId>,
}

/// Builds a raw subtree inside a [`SyntaxTree`] from parser events.
///
/// Only the forward links (`first_child`, `next_sibling`) are set; parent
/// and previous-sibling links and spans are filled in later by
/// [`SyntaxTree::finish`] or [`SyntaxTree::attach_file`].
pub struct Builder<'t> {
    tree: &'t mut SyntaxTree,
    file: Option<FileId>,
    opened: Vec<Opened>,
    root: Option<NodeId>,
}

impl Drop for Builder<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

impl<'t> Builder<'t> {
    /// Every node built is tagged with `path`, when given.
    pub fn new(tree: &'t mut SyntaxTree, path: Option<&Utf8Path>) -> Self {
        let file = path.map(|path| tree.intern_file(path));
        Self { tree, file, opened: Vec::new(), root: None }
    }

    /// Starts a node whose own token sits at `line:column`.
    pub fn start_node(
        &mut self,
        kind: SyntaxKind,
        text: impl Into<String>,
        line: u32,
        column: u32,
    ) {
        let node = self.alloc(kind, text.into(), line, column);
        self.attach(node);
        self.opened.push(Opened { node, last_child: None });
    }

    /// Starts a node that has no token of its own.
    pub fn start_group(&mut self, kind: SyntaxKind) {
        self.start_node(kind, kind.canonical_text(), 0, 0);
    }

    /// Adds a childless node.
    pub fn token(&mut self, kind: SyntaxKind, text: impl Into<String>, line: u32, column: u32) {
        let node = self.alloc(kind, text.into(), line, column);
        self.attach(node);
    }

    pub fn finish_node(&mut self) {
        self.opened.pop().expect("no opened nodes?");
    }

    /// Returns the single top-level node built.
    pub fn finish(mut self) -> NodeId {
        assert!(self.opened.is_empty(), "unfinished nodes left in the builder");
        self.root.take().expect("builder produced no nodes")
    }

    fn alloc(&mut self, kind: SyntaxKind, text: String, line: u32, column: u32) -> NodeId {
        let node = self.tree.new_token(kind, text, line, column);
        self.tree.set_file(node, self.file);
        node
    }

    fn attach(&mut self, node: NodeId) {
        let Some(open) = self.opened.last_mut() else {
            assert!(self.root.is_none(), "a builder produces a single top-level node");
            self.root = Some(node);
            return;
        };
        match open.last_child {
            Some(last) => self.tree.nodes[last].next_sibling = Some(node),
            None => self.tree.nodes[open.node].first_child = Some(node),
        }
        open.last_child = Some(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_forward_links_only() {
        let mut tree = SyntaxTree::new();
        let mut builder = Builder::new(&mut tree, Some(Utf8Path::new("A.java")));
        builder.start_group(SyntaxKind::FILE);
        builder.token(SyntaxKind::IDENT, "a", 1, 1);
        builder.token(SyntaxKind::IDENT, "b", 1, 3);
        builder.finish_node();
        let file = builder.finish();

        let children = tree.children(file).collect::<Vec<_>>();
        assert_eq!(children.len(), 2);
        assert_eq!(tree.parent(children[1]), None);
        assert_eq!(tree.prev_sibling(children[1]), None);
        assert_eq!(tree.file(children[0]).map(Utf8Path::as_str), Some("A.java"));
        assert_eq!(tree.span(file), None);
    }

    #[test]
    #[should_panic(expected = "you should call `Builder::finish()`")]
    fn dropping_an_unfinished_builder_panics() {
        let mut tree = SyntaxTree::new();
        let mut builder = Builder::new(&mut tree, None);
        builder.start_group(SyntaxKind::FILE);
    }
}
