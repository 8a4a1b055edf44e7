//! The finishing pass over freshly parsed subtrees.

use tracing::debug;
use transmog_span::{Span, compose_into};

use crate::tree::FileId;
use crate::{NodeId, SyntaxTree};

impl SyntaxTree {
    /// Back-fills `file`, parent and previous-sibling links below `node` and
    /// computes every node's span bottom-up.
    ///
    /// A node's span covers the spans of all its children plus its own token,
    /// if it has one. Returns the span stored on `node`, which is `None` when
    /// nothing in the subtree carries a position.
    pub fn finish(
        &mut self,
        node: NodeId,
        file: Option<FileId>,
        parent: Option<NodeId>,
        previous: Option<NodeId>,
    ) -> Option<Span> {
        let data = &mut self.nodes[node];
        data.file = file;
        data.parent = parent;
        data.prev_sibling = previous;

        let mut span = None;
        let mut previous = None;
        let mut child = self.nodes[node].first_child;
        while let Some(current) = child {
            compose_into(&mut span, self.finish(current, file, Some(node), previous));
            previous = Some(current);
            child = self.nodes[current].next_sibling;
        }

        let data = &mut self.nodes[node];
        if data.line != 0 {
            let len = data.text.chars().count() as u32;
            compose_into(&mut span, Some(Span::token(data.line, data.column, len)));
        }
        data.span = span;
        span
    }

    /// Appends a raw file subtree under the root and finishes it.
    pub fn attach_file(&mut self, file_node: NodeId) -> Option<Span> {
        let root = self.root();
        self.push_child(root, file_node);
        let file = self.file_id(file_node);
        let previous = self.prev_sibling(file_node);
        let span = self.finish(file_node, file, Some(root), previous);
        debug!(path = ?self.file(file_node), ?span, "attached file");
        span
    }

    pub fn contains(&self, node: NodeId, line: u32, column: u32) -> bool {
        self.span(node).is_some_and(|span| span.contains(line, column))
    }

    /// The deepest node under `node` whose span contains `line:column`.
    ///
    /// Children are searched in order and the first match wins.
    pub fn enclosing_node(&self, node: NodeId, line: u32, column: u32) -> Option<NodeId> {
        if !self.contains(node, line, column) {
            return None;
        }
        self.children(node)
            .find_map(|child| self.enclosing_node(child, line, column))
            .or(Some(node))
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8Path;

    use super::*;
    use crate::{Builder, SyntaxKind};

    /// `int x = 4;` as the parser would produce it.
    fn variable_def(tree: &mut SyntaxTree) -> NodeId {
        let mut builder = Builder::new(tree, Some(Utf8Path::new("A.java")));
        builder.start_group(SyntaxKind::FILE);
        builder.start_group(SyntaxKind::VARIABLE_DEF);
        builder.start_group(SyntaxKind::TYPE);
        builder.token(SyntaxKind::INT_KW, "int", 3, 5);
        builder.finish_node();
        builder.token(SyntaxKind::IDENT, "x", 3, 9);
        builder.start_node(SyntaxKind::ASSIGN, "=", 3, 11);
        builder.start_group(SyntaxKind::EXPR);
        builder.token(SyntaxKind::NUM_INT, "4", 3, 13);
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn spans_are_composed_bottom_up() {
        let mut tree = SyntaxTree::new();
        let file = variable_def(&mut tree);
        let span = tree.attach_file(file);

        assert_eq!(span, Some(Span::new(3, 5, 3, 13)));
        let def = tree.first_child(file).unwrap();
        let children = tree.children(def).collect::<Vec<_>>();
        let [ty, ident, assign] = children[..] else { panic!("expected three children") };
        assert_eq!(tree.span(ty), Some(Span::new(3, 5, 3, 7)));
        assert_eq!(tree.span(ident), Some(Span::new(3, 9, 3, 9)));
        assert_eq!(tree.span(assign), Some(Span::new(3, 11, 3, 13)));

        for node in tree.descendants(file) {
            let Some(span) = tree.span(node) else { continue };
            for child in tree.children(node) {
                if let Some(child_span) = tree.span(child) {
                    assert!(span.contains_span(&child_span), "{node:?} does not cover {child:?}");
                }
            }
        }
    }

    #[test]
    fn links_are_back_filled() {
        let mut tree = SyntaxTree::new();
        let file = variable_def(&mut tree);
        tree.attach_file(file);

        assert_eq!(tree.check_links(tree.root()), Ok(()));
        assert_eq!(tree.parent(file), Some(tree.root()));
        let def = tree.first_child(file).unwrap();
        let ident = tree.children(def).nth(1).unwrap();
        assert_eq!(tree.parent(ident), Some(def));
        assert_eq!(tree.prev_sibling(ident), tree.first_child(def));
        assert_eq!(tree.file(ident).map(Utf8Path::as_str), Some("A.java"));
    }

    #[test]
    fn empty_file_has_no_span() {
        let mut tree = SyntaxTree::new();
        let file = tree.new_node(SyntaxKind::FILE, "");
        assert_eq!(tree.attach_file(file), None);
        assert_eq!(tree.span(file), None);
    }

    #[test]
    fn enclosing_node_prefers_the_deepest_match() {
        let mut tree = SyntaxTree::new();
        let file = variable_def(&mut tree);
        tree.attach_file(file);

        let found = tree.enclosing_node(file, 3, 13).unwrap();
        assert_eq!(tree.text(found), "4");
        let found = tree.enclosing_node(file, 3, 10).unwrap();
        assert_eq!(tree.kind(found), SyntaxKind::VARIABLE_DEF);
        assert_eq!(tree.enclosing_node(file, 4, 1), None);
    }
}
