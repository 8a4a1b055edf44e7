//! Queries and cross-tree operations over a finished tree.

use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::{NodeId, SyntaxKind, SyntaxTree};

/// Replaces `old` in `target` by a copy of `new_subtree` from `source` and
/// returns the copy. `old` ends up detached.
pub fn replace_across_trees(
    target: &mut SyntaxTree,
    old: NodeId,
    source: &SyntaxTree,
    new_subtree: NodeId,
) -> NodeId {
    let copy = target.import_subtree(source, new_subtree);
    target.replace_in_place(old, copy);
    copy
}

/// The child of the root that holds `path`.
pub fn locate_file_node(tree: &SyntaxTree, path: &Utf8Path) -> Option<NodeId> {
    tree.children(tree.root()).find(|&file| tree.file(file) == Some(path))
}

/// The first line found on `node` or, failing that, on its descendants in
/// preorder. `None` means the location is unknown.
pub fn line_of(tree: &SyntaxTree, node: NodeId) -> Option<u32> {
    match tree.line(node) {
        0 => tree.children(node).find_map(|child| line_of(tree, child)),
        line => Some(line),
    }
}

/// Like [`line_of`], for columns.
pub fn column_of(tree: &SyntaxTree, node: NodeId) -> Option<u32> {
    match tree.column(node) {
        0 => tree.children(node).find_map(|child| column_of(tree, child)),
        column => Some(column),
    }
}

/// Reconstructs the source spelling of a (possibly qualified) name.
///
/// `DOT` chains render as `a.b.c`, array declarators as `T[]`, method calls
/// as `callee()`. Any other node renders as its own text.
pub fn dotted_name(tree: &SyntaxTree, node: NodeId) -> String {
    let first = tree.first_child(node);
    match (tree.kind(node), first) {
        (SyntaxKind::DOT, Some(left)) => match tree.next_sibling(left) {
            Some(right) => format!("{}.{}", dotted_name(tree, left), dotted_name(tree, right)),
            None => dotted_name(tree, left),
        },
        (SyntaxKind::ARRAY_DECLARATOR, Some(base)) => {
            let mut name = dotted_name(tree, base);
            if let Some(element) = tree.next_sibling(base) {
                name.push('.');
                name.push_str(&dotted_name(tree, element));
            }
            name.push_str("[]");
            name
        }
        (SyntaxKind::METHOD_CALL, Some(callee)) => format!("{}()", dotted_name(tree, callee)),
        _ => tree.text(node).to_owned(),
    }
}

/// `true` if both subtrees have the same shape, kinds and texts.
pub fn structurally_eq(a_tree: &SyntaxTree, a: NodeId, b_tree: &SyntaxTree, b: NodeId) -> bool {
    if a_tree.kind(a) != b_tree.kind(b) || a_tree.text(a) != b_tree.text(b) {
        return false;
    }
    let mut a_children = a_tree.children(a);
    let mut b_children = b_tree.children(b);
    loop {
        match (a_children.next(), b_children.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if structurally_eq(a_tree, a, b_tree, b) => {}
            _ => return false,
        }
    }
}

/// Describes a node as `name@path:line`.
pub fn report(tree: &SyntaxTree, node: NodeId) -> String {
    let path = tree.file(node).map_or("<synthetic>", Utf8Path::as_str);
    format!("{}@{}:{}", dotted_name(tree, node), path, tree.line(node))
}

/// Folds the file subtrees of `new_tree` into `old_tree`.
///
/// A file `old_tree` already holds is replaced by a copy of the new one in
/// the same position; any other file is copied in as the new first child of
/// the root.
pub fn merge_file_trees(new_tree: &SyntaxTree, old_tree: &mut SyntaxTree) {
    let mut existing: FxHashMap<Utf8PathBuf, NodeId> = old_tree
        .children(old_tree.root())
        .filter_map(|file| Some((old_tree.file(file)?.to_owned(), file)))
        .collect();

    for file in new_tree.children(new_tree.root()) {
        let Some(path) = new_tree.file(file) else {
            warn!(?file, "skipping a file node without a path");
            continue;
        };
        match existing.get(path).copied() {
            Some(old) => {
                let copy = replace_across_trees(old_tree, old, new_tree, file);
                existing.insert(path.to_owned(), copy);
                debug!(%path, "replaced file");
            }
            None => {
                let copy = old_tree.import_subtree(new_tree, file);
                let root = old_tree.root();
                old_tree.push_front_child(root, copy);
                existing.insert(path.to_owned(), copy);
                debug!(%path, "added file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Builder;

    fn dot_chain(tree: &mut SyntaxTree, name: &str) -> NodeId {
        let mut builder = Builder::new(tree, None);
        let parts = name.split('.').collect::<Vec<_>>();
        for _ in 1..parts.len() {
            builder.start_group(SyntaxKind::DOT);
        }
        for (index, part) in parts.iter().enumerate() {
            builder.token(SyntaxKind::IDENT, *part, 0, 0);
            if index > 0 {
                builder.finish_node();
            }
        }
        builder.finish()
    }

    #[test]
    fn dotted_names() {
        let mut tree = SyntaxTree::new();
        let dot = dot_chain(&mut tree, "java.util.List");
        assert_eq!(dotted_name(&tree, dot), "java.util.List");

        let array = tree.new_node(SyntaxKind::ARRAY_DECLARATOR, "[");
        let base = tree.new_node(SyntaxKind::IDENT, "String");
        tree.push_child(array, base);
        assert_eq!(dotted_name(&tree, array), "String[]");
        let element = tree.new_node(SyntaxKind::IDENT, "Entry");
        tree.push_child(array, element);
        assert_eq!(dotted_name(&tree, array), "String.Entry[]");

        let call = tree.new_node(SyntaxKind::METHOD_CALL, "(");
        tree.push_child(call, dot);
        assert_eq!(dotted_name(&tree, call), "java.util.List()");

        let plus = tree.new_node(SyntaxKind::PLUS, "+");
        assert_eq!(dotted_name(&tree, plus), "+");
    }

    #[test]
    fn location_falls_back_to_descendants() {
        let mut tree = SyntaxTree::new();
        let expr = tree.new_node(SyntaxKind::EXPR, "EXPR");
        let group = tree.new_node(SyntaxKind::ELIST, "ELIST");
        let ident = tree.new_token(SyntaxKind::IDENT, "total", 12, 9);
        tree.push_child(expr, group);
        tree.push_child(expr, ident);

        assert_eq!(line_of(&tree, expr), Some(12));
        assert_eq!(column_of(&tree, expr), Some(9));
        assert_eq!(line_of(&tree, group), None);
        assert_eq!(column_of(&tree, group), None);
    }

    #[test]
    fn structural_equality_sees_text_and_shape() {
        let mut tree = SyntaxTree::new();
        let a = dot_chain(&mut tree, "a.b");
        let b = dot_chain(&mut tree, "a.b");
        let c = dot_chain(&mut tree, "a.c");
        let d = dot_chain(&mut tree, "a.b.c");
        assert!(structurally_eq(&tree, a, &tree, b));
        assert!(!structurally_eq(&tree, a, &tree, c));
        assert!(!structurally_eq(&tree, a, &tree, d));
    }

    #[test]
    fn report_names_the_location() {
        let mut tree = SyntaxTree::new();
        let mut builder = Builder::new(&mut tree, Some(Utf8Path::new("src/Cart.java")));
        builder.token(SyntaxKind::IDENT, "items", 4, 17);
        let ident = builder.finish();
        assert_eq!(report(&tree, ident), "items@src/Cart.java:4");

        let bare = tree.new_node(SyntaxKind::IDENT, "tmp");
        assert_eq!(report(&tree, bare), "tmp@<synthetic>:0");
    }
}
