//! Arena-backed syntax tree whose nodes link to their parent and to both
//! neighbouring siblings.
//!
//! All link surgery goes through the primitives at the bottom of this module
//! (`unlink`, `insert_before`, `insert_after`, `push_child`,
//! `push_front_child`, `replace_in_place`). Each of them leaves the forward
//! links (`first_child`, `next_sibling`) and the backward links (`parent`,
//! `prev_sibling`) in agreement, and each clears the links of any node it
//! detaches.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use tracing::trace;
use transmog_span::{Position, Span};

use crate::arena::{Arena, Key};
use crate::error::LinkError;
use crate::iter::{Ancestors, Children, Preorder, WalkEvent};
use crate::SyntaxKind;

pub type NodeId = Key<NodeData>;

/// Interned source file identity, local to one [`SyntaxTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileId(u32);

/// Opaque link to a scope owned by the symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeRef(pub u32);

/// Opaque link to a definition owned by the symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DefinitionRef(pub u32);

#[derive(Clone, Debug)]
pub struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) text: String,
    pub(crate) file: Option<FileId>,
    pub(crate) line: u32,
    pub(crate) column: u32,
    pub(crate) span: Option<Span>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,

    pub(crate) scope: Option<ScopeRef>,
    pub(crate) definition: Option<DefinitionRef>,
    pub(crate) meaningful: bool,
    /// Only meaningful on file nodes.
    pub(crate) dirty: bool,
}

impl NodeData {
    pub(crate) fn new(kind: SyntaxKind, text: String) -> Self {
        Self {
            kind,
            text,
            file: None,
            line: 0,
            column: 0,
            span: None,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            first_child: None,
            scope: None,
            definition: None,
            meaningful: true,
            dirty: false,
        }
    }

    pub(crate) fn clear_links(&mut self) {
        self.parent = None;
        self.prev_sibling = None;
        self.next_sibling = None;
    }
}

/// A whole-program tree: one `ROOT` node whose children are `FILE` nodes.
///
/// Detached nodes stay allocated until the tree is dropped, so a `NodeId`
/// never dangles. Ids from another tree are not checked and either panic or
/// address an unrelated node.
#[derive(Debug)]
pub struct SyntaxTree {
    pub(crate) nodes: Arena<NodeData>,
    files: IndexSet<Utf8PathBuf>,
    root: NodeId,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxTree {
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(NodeData::new(SyntaxKind::ROOT, String::new()));
        Self { nodes, files: IndexSet::default(), root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of allocated nodes, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a detached node with no source position.
    pub fn new_node(&mut self, kind: SyntaxKind, text: impl Into<String>) -> NodeId {
        self.nodes.alloc(NodeData::new(kind, text.into()))
    }

    /// Allocates a detached node for a token read at `line:column`.
    pub fn new_token(
        &mut self,
        kind: SyntaxKind,
        text: impl Into<String>,
        line: u32,
        column: u32,
    ) -> NodeId {
        let mut data = NodeData::new(kind, text.into());
        data.line = line;
        data.column = column;
        self.nodes.alloc(data)
    }

    pub fn intern_file(&mut self, path: &Utf8Path) -> FileId {
        if let Some(index) = self.files.get_index_of(path) {
            return FileId(index as u32);
        }
        let (index, _) = self.files.insert_full(path.to_owned());
        FileId(index as u32)
    }

    pub fn lookup_file(&self, path: &Utf8Path) -> Option<FileId> {
        self.files.get_index_of(path).map(|index| FileId(index as u32))
    }

    #[track_caller]
    pub fn file_path(&self, file: FileId) -> &Utf8Path {
        &self.files[file.0 as usize]
    }

    #[track_caller]
    fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node]
    }

    #[track_caller]
    fn data_mut(&mut self, node: NodeId) -> &mut NodeData {
        &mut self.nodes[node]
    }

    pub fn kind(&self, node: NodeId) -> SyntaxKind {
        self.data(node).kind
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.data(node).text
    }

    /// Replaces the text without touching the dirty flag; see
    /// [`crate::Editor::rename`] for the tracked variant.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.data_mut(node).text = text.into();
    }

    pub fn file_id(&self, node: NodeId) -> Option<FileId> {
        self.data(node).file
    }

    pub fn file(&self, node: NodeId) -> Option<&Utf8Path> {
        self.file_id(node).map(|file| self.file_path(file))
    }

    pub fn set_file(&mut self, node: NodeId, file: Option<FileId>) {
        self.data_mut(node).file = file;
    }

    /// The node's own line, `0` for nodes without a token.
    pub fn line(&self, node: NodeId) -> u32 {
        self.data(node).line
    }

    /// The node's own column, `0` for nodes without a token.
    pub fn column(&self, node: NodeId) -> u32 {
        self.data(node).column
    }

    pub fn position(&self, node: NodeId) -> Option<Position> {
        let data = self.data(node);
        (data.line != 0).then(|| Position::new(data.line, data.column))
    }

    pub fn set_position(&mut self, node: NodeId, line: u32, column: u32) {
        let data = self.data_mut(node);
        data.line = line;
        data.column = column;
    }

    /// `None` until the finishing pass has run, and for subtrees without any
    /// positioned token.
    pub fn span(&self, node: NodeId) -> Option<Span> {
        self.data(node).span
    }

    pub fn set_span(&mut self, node: NodeId, span: Option<Span>) {
        self.data_mut(node).span = span;
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).parent
    }

    pub fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).prev_sibling
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).next_sibling
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).first_child
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).last()
    }

    pub fn children(&self, node: NodeId) -> Children<'_> {
        Children::new(self, self.first_child(node))
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.children(node).count()
    }

    /// Ancestors of `node`, starting from its parent.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors::new(self, self.parent(node))
    }

    pub fn preorder(&self, node: NodeId) -> Preorder<'_> {
        Preorder::new(self, node)
    }

    /// `node` and everything below it, in preorder.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.preorder(node).filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }

    pub fn first_child_of_kind(&self, node: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.children(node).find(|&child| self.kind(child) == kind)
    }

    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|it| it == ancestor)
    }

    /// `true` if the node has a parent or siblings.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let data = self.data(node);
        data.parent.is_some() || data.prev_sibling.is_some() || data.next_sibling.is_some()
    }

    pub fn scope(&self, node: NodeId) -> Option<ScopeRef> {
        self.data(node).scope
    }

    pub fn set_scope(&mut self, node: NodeId, scope: Option<ScopeRef>) {
        self.data_mut(node).scope = scope;
    }

    pub fn definition(&self, node: NodeId) -> Option<DefinitionRef> {
        self.data(node).definition
    }

    pub fn set_definition(&mut self, node: NodeId, definition: Option<DefinitionRef>) {
        self.data_mut(node).definition = definition;
    }

    pub fn is_meaningful(&self, node: NodeId) -> bool {
        self.data(node).meaningful
    }

    pub fn set_meaningful(&mut self, node: NodeId, meaningful: bool) {
        self.data_mut(node).meaningful = meaningful;
    }

    /// Marks every identifier in the subtree as not meaningful to the
    /// symbol table.
    pub fn ignore_children(&mut self, node: NodeId) {
        let idents = self
            .descendants(node)
            .filter(|&it| self.kind(it) == SyntaxKind::IDENT)
            .collect::<Vec<_>>();
        for ident in idents {
            self.set_meaningful(ident, false);
        }
    }

    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.data(node).dirty
    }

    pub fn mark_dirty(&mut self, node: NodeId) {
        self.data_mut(node).dirty = true;
    }

    /// Clears the dirty flag once the embedding application has written the
    /// file back. Nothing in this crate calls it.
    pub fn mark_clean(&mut self, node: NodeId) {
        self.data_mut(node).dirty = false;
    }

    /// Verifies that the sibling and parent links below `node` agree with the
    /// forward links.
    pub fn check_links(&self, node: NodeId) -> Result<(), LinkError> {
        let mut budget = self.nodes.len();
        for parent in self.descendants(node) {
            let mut expected_prev = None;
            for child in self.children(parent) {
                budget = budget.checked_sub(1).ok_or(LinkError::Cycle { node: parent })?;
                let data = self.data(child);
                if data.parent != Some(parent) {
                    return Err(LinkError::Parent {
                        node: child,
                        expected: parent,
                        found: data.parent,
                    });
                }
                if data.prev_sibling != expected_prev {
                    return Err(LinkError::PrevSibling {
                        node: child,
                        expected: expected_prev,
                        found: data.prev_sibling,
                    });
                }
                expected_prev = Some(child);
            }
        }
        Ok(())
    }

    /// Detaches `node` from its parent and siblings and clears its links.
    ///
    /// A node that is already detached is left alone.
    pub fn unlink(&mut self, node: NodeId) {
        let data = self.data(node);
        let (parent, prev, next) = (data.parent, data.prev_sibling, data.next_sibling);

        match prev {
            Some(prev) => self.data_mut(prev).next_sibling = next,
            None => {
                if let Some(parent) = parent
                    && self.data(parent).first_child == Some(node)
                {
                    self.data_mut(parent).first_child = next;
                }
            }
        }
        if let Some(next) = next {
            self.data_mut(next).prev_sibling = prev;
        }

        self.data_mut(node).clear_links();
        trace!(?node, ?parent, "unlink");
    }

    /// Links `node` as the sibling directly after `anchor`, detaching it from
    /// wherever it was first.
    pub fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        debug_assert_ne!(anchor, node, "cannot insert a node after itself");
        self.unlink(node);

        let data = self.data(anchor);
        let (parent, next) = (data.parent, data.next_sibling);
        debug_assert!(
            parent.is_none_or(|parent| !self.is_ancestor_or_self(node, parent)),
            "inserting {node:?} would create a cycle"
        );

        let data = self.data_mut(node);
        data.parent = parent;
        data.prev_sibling = Some(anchor);
        data.next_sibling = next;
        if let Some(next) = next {
            self.data_mut(next).prev_sibling = Some(node);
        }
        self.data_mut(anchor).next_sibling = Some(node);
        trace!(?anchor, ?node, "insert_after");
    }

    /// Links `node` as the sibling directly before `anchor`, detaching it
    /// from wherever it was first.
    pub fn insert_before(&mut self, anchor: NodeId, node: NodeId) {
        debug_assert_ne!(anchor, node, "cannot insert a node before itself");
        self.unlink(node);

        let data = self.data(anchor);
        let (parent, prev) = (data.parent, data.prev_sibling);
        debug_assert!(
            parent.is_none_or(|parent| !self.is_ancestor_or_self(node, parent)),
            "inserting {node:?} would create a cycle"
        );

        let data = self.data_mut(node);
        data.parent = parent;
        data.prev_sibling = prev;
        data.next_sibling = Some(anchor);
        match prev {
            Some(prev) => self.data_mut(prev).next_sibling = Some(node),
            None => {
                if let Some(parent) = parent {
                    self.data_mut(parent).first_child = Some(node);
                }
            }
        }
        self.data_mut(anchor).prev_sibling = Some(node);
        trace!(?anchor, ?node, "insert_before");
    }

    /// Links `node` as the first child of `parent`.
    pub fn push_front_child(&mut self, parent: NodeId, node: NodeId) {
        debug_assert!(
            !self.is_ancestor_or_self(node, parent),
            "inserting {node:?} would create a cycle"
        );
        self.unlink(node);

        let first = self.data(parent).first_child;
        let data = self.data_mut(node);
        data.parent = Some(parent);
        data.prev_sibling = None;
        data.next_sibling = first;
        if let Some(first) = first {
            self.data_mut(first).prev_sibling = Some(node);
        }
        self.data_mut(parent).first_child = Some(node);
        trace!(?parent, ?node, "push_front_child");
    }

    /// Links `node` as the last child of `parent`.
    ///
    /// There is no tail pointer, so this walks the existing children.
    pub fn push_child(&mut self, parent: NodeId, node: NodeId) {
        self.unlink(node);
        match self.last_child(parent) {
            Some(last) => self.insert_after(last, node),
            None => self.push_front_child(parent, node),
        }
    }

    /// Puts `new` into the slot occupied by `old` and detaches `old`.
    pub fn replace_in_place(&mut self, old: NodeId, new: NodeId) {
        if old == new {
            return;
        }
        debug_assert!(!self.is_ancestor_or_self(new, old), "replacing {old:?} by its own ancestor");
        self.unlink(new);

        let data = self.data(old);
        let (parent, prev, next) = (data.parent, data.prev_sibling, data.next_sibling);

        let data = self.data_mut(new);
        data.parent = parent;
        data.prev_sibling = prev;
        data.next_sibling = next;
        match prev {
            Some(prev) => self.data_mut(prev).next_sibling = Some(new),
            None => {
                if let Some(parent) = parent {
                    self.data_mut(parent).first_child = Some(new);
                }
            }
        }
        if let Some(next) = next {
            self.data_mut(next).prev_sibling = Some(new);
        }

        self.data_mut(old).clear_links();
        trace!(?old, ?new, ?parent, "replace_in_place");
    }
}
