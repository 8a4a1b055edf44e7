use std::fmt::Write as _;

use crate::iter::WalkEvent;
use crate::{NodeId, SyntaxTree};

impl SyntaxTree {
    /// Renders the subtree at `node`, one node per line:
    ///
    /// ```text
    /// VARIABLE_DEF "VARIABLE_DEF"
    ///   IDENT "x" @3:9
    /// ```
    ///
    /// Positions are omitted for nodes without one, and file nodes that need
    /// saving are tagged `dirty`.
    pub fn debug_dump(&self, node: NodeId) -> String {
        let mut buf = String::new();
        let mut depth = 0usize;
        for event in self.preorder(node) {
            match event {
                WalkEvent::Enter(node) => {
                    let _ = write!(buf, "{:indent$}{:?}", "", self.kind(node), indent = depth * 2);
                    let text = self.text(node);
                    if !text.is_empty() {
                        let _ = write!(buf, " {text:?}");
                    }
                    if let Some(position) = self.position(node) {
                        let _ = write!(buf, " @{position}");
                    }
                    if self.is_dirty(node) {
                        buf.push_str(" dirty");
                    }
                    buf.push('\n');
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth -= 1,
            }
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use crate::{Builder, SyntaxKind, SyntaxTree};

    #[test]
    fn dump_shows_positions_and_dirt() {
        let mut tree = SyntaxTree::new();
        let mut builder = Builder::new(&mut tree, None);
        builder.start_group(SyntaxKind::FILE);
        builder.start_group(SyntaxKind::VARIABLE_DEF);
        builder.start_group(SyntaxKind::TYPE);
        builder.token(SyntaxKind::INT_KW, "int", 3, 5);
        builder.finish_node();
        builder.token(SyntaxKind::IDENT, "x", 3, 9);
        builder.finish_node();
        builder.finish_node();
        let file = builder.finish();
        tree.attach_file(file);
        tree.mark_dirty(file);

        expect![[r#"
            ROOT
              FILE dirty
                VARIABLE_DEF "VARIABLE_DEF"
                  TYPE "TYPE"
                    INT_KW "int" @3:5
                  IDENT "x" @3:9
        "#]]
        .assert_eq(&tree.debug_dump(tree.root()));
    }
}
