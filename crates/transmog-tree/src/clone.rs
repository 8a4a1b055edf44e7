use camino::Utf8PathBuf;

use crate::tree::NodeData;
use crate::{NodeId, SyntaxTree};

/// Detached copy of a subtree, independent of any arena.
struct Snapshot {
    data: NodeData,
    file: Option<Utf8PathBuf>,
    children: Vec<Snapshot>,
}

impl Snapshot {
    fn take(tree: &SyntaxTree, node: NodeId) -> Self {
        let mut data = tree.nodes[node].clone();
        data.clear_links();
        data.first_child = None;
        // A copy is not a reference the symbol table knows about.
        data.scope = None;
        data.definition = None;

        Self {
            file: tree.file(node).map(ToOwned::to_owned),
            children: tree.children(node).map(|child| Self::take(tree, child)).collect(),
            data,
        }
    }

    fn materialize(self, tree: &mut SyntaxTree, parent: Option<NodeId>) -> NodeId {
        let Self { mut data, file, children } = self;
        data.file = file.map(|path| tree.intern_file(&path));
        data.parent = parent;
        let node = tree.nodes.alloc(data);

        let mut previous = None;
        for child in children {
            let child = child.materialize(tree, Some(node));
            match previous {
                Some(previous) => {
                    tree.nodes[previous].next_sibling = Some(child);
                    tree.nodes[child].prev_sibling = Some(previous);
                }
                None => tree.nodes[node].first_child = Some(child),
            }
            previous = Some(child);
        }
        node
    }
}

impl SyntaxTree {
    /// Copies the subtree rooted at `node` into fresh, detached nodes.
    ///
    /// The copy keeps kinds, texts, positions, spans, files and dirty flags,
    /// and drops symbol-table links.
    pub fn deep_clone(&mut self, node: NodeId) -> NodeId {
        Snapshot::take(self, node).materialize(self, None)
    }

    /// Copies a subtree of `source` into this tree as a detached subtree.
    pub fn import_subtree(&mut self, source: &Self, node: NodeId) -> NodeId {
        Snapshot::take(source, node).materialize(self, None)
    }
}
