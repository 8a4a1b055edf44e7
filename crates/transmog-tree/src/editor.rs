//! Structural edits used by refactorings.
//!
//! Every mutation marks the file enclosing the touched node as dirty. A node
//! that is not linked under a file, such as a freshly synthesized one, has
//! nothing to mark.

use tracing::{debug, trace};

use crate::syntax_set::STATEMENT_KINDS;
use crate::utils::locate_file_node;
use crate::{EditError, NodeId, SyntaxKind, SyntaxTree};

/// The right-hand side of an expression, as found by [`Editor::rhs_of`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rhs {
    /// A node distinct from the left-hand side.
    Distinct(NodeId),
    /// The expression has a single operand, so both sides are this node.
    SameAsLhs(NodeId),
}

impl Rhs {
    pub fn node(self) -> NodeId {
        match self {
            Self::Distinct(node) | Self::SameAsLhs(node) => node,
        }
    }
}

pub struct Editor<'t> {
    tree: &'t mut SyntaxTree,
}

impl<'t> Editor<'t> {
    pub fn new(tree: &'t mut SyntaxTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &SyntaxTree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut SyntaxTree {
        self.tree
    }

    /// Marks the file node that `node` belongs to as dirty.
    pub fn add_dirty_file(&mut self, node: NodeId) {
        if let Some(file_node) = self.file_node_of(node) {
            trace!(path = ?self.tree.file(file_node), "dirty");
            self.tree.mark_dirty(file_node);
        }
    }

    /// The `FILE` node at or above `node`, or else the file node recorded on
    /// `node` by the finishing pass.
    fn file_node_of(&self, node: NodeId) -> Option<NodeId> {
        let root = self.tree.root();
        std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .find(|&it| {
                self.tree.kind(it) == SyntaxKind::FILE || self.tree.parent(it) == Some(root)
            })
            .or_else(|| locate_file_node(self.tree, self.tree.file(node)?))
    }

    pub fn rename(&mut self, node: NodeId, text: impl Into<String>) {
        self.add_dirty_file(node);
        let text = text.into();
        debug!(?node, from = self.tree.text(node), to = %text, "rename");
        self.tree.set_text(node, text);
    }

    /// Detaches `node`, which must have a parent. Its links are cleared so it
    /// can be discarded or linked elsewhere.
    pub fn remove(&mut self, node: NodeId) -> Result<(), EditError> {
        self.expect_parent(node)?;
        self.add_dirty_file(node);
        self.tree.unlink(node);
        Ok(())
    }

    /// Puts `new` into the slot of `node`, which ends up detached.
    pub fn replace(&mut self, node: NodeId, new: NodeId) -> Result<(), EditError> {
        self.expect_parent(node)?;
        self.add_dirty_file(node);
        self.tree.replace_in_place(node, new);
        Ok(())
    }

    /// Replaces the run of siblings from `start` up to, but not including,
    /// `keep_from` with `replacement`. With `keep_from` of `None` the run
    /// extends to the end of the list.
    ///
    /// Every node of the run ends up detached, except `replacement` when it
    /// is taken from the run itself.
    pub fn clip_and_replace(
        &mut self,
        start: NodeId,
        keep_from: Option<NodeId>,
        replacement: NodeId,
    ) -> Result<(), EditError> {
        self.expect_parent(start)?;

        let mut clipped = Vec::new();
        let mut current = self.tree.next_sibling(start);
        while let Some(node) = current
            && current != keep_from
        {
            if node != replacement {
                clipped.push(node);
            }
            current = self.tree.next_sibling(node);
        }
        if let Some(keep) = keep_from
            && current.is_none()
        {
            return Err(EditError::NotAFollowingSibling { start, keep });
        }

        self.add_dirty_file(start);
        self.tree.replace_in_place(start, replacement);
        for node in &clipped {
            self.tree.unlink(*node);
        }
        debug!(?start, clipped = clipped.len() + 1, "clip_and_replace");
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, node: NodeId) {
        self.add_dirty_file(parent);
        self.tree.push_child(parent, node);
    }

    pub fn prepend_child(&mut self, parent: NodeId, node: NodeId) {
        self.add_dirty_file(parent);
        self.tree.push_front_child(parent, node);
    }

    /// Inserts `method` as the last member of the class body enclosing
    /// `anchor`, keeping the body's closing brace last.
    pub fn add_method_near(&mut self, method: NodeId, anchor: NodeId) -> Result<(), EditError> {
        let body = std::iter::once(anchor)
            .chain(self.tree.ancestors(anchor))
            .find(|&node| self.tree.kind(node) == SyntaxKind::OBJBLOCK)
            .ok_or(EditError::NoEnclosing { kind: SyntaxKind::OBJBLOCK, node: anchor })?;
        let closing = self
            .tree
            .first_child_of_kind(body, SyntaxKind::RIGHT_BRACE)
            .ok_or(EditError::MissingChild { parent: body, kind: SyntaxKind::RIGHT_BRACE })?;

        self.add_dirty_file(anchor);
        self.tree.unlink(closing);
        self.tree.push_child(body, method);
        let closing = self.make_bare_node(SyntaxKind::RIGHT_BRACE);
        self.tree.push_child(body, closing);
        debug!(?method, ?body, "added method");
        Ok(())
    }

    /// Wraps `expr` as `return expr;`, adding an `EXPR` wrapper when `expr`
    /// is not one already.
    pub fn make_return_statement(&mut self, expr: NodeId) -> NodeId {
        if self.tree.is_attached(expr) {
            self.add_dirty_file(expr);
        }
        let expr = if self.tree.kind(expr) == SyntaxKind::EXPR {
            expr
        } else {
            let wrapper = self.make_bare_node(SyntaxKind::EXPR);
            self.tree.push_child(wrapper, expr);
            wrapper
        };
        let statement = self.tree.new_node(SyntaxKind::RETURN_KW, "return");
        self.tree.push_child(statement, expr);
        statement
    }

    /// Builds `import a.b.C` for a fully qualified class name.
    pub fn make_import_node(&mut self, qualified_name: &str) -> NodeId {
        let import = self.make_bare_node(SyntaxKind::IMPORT);
        let name = self.make_dot_node(qualified_name);
        self.tree.push_child(import, name);
        import
    }

    /// Builds a `DOT` chain for `a.b.c`, splitting on the last dot first, so
    /// the result is `DOT(DOT(a, b), c)`.
    pub fn make_dot_node(&mut self, dotted: &str) -> NodeId {
        match dotted.rfind('.') {
            Some(last_dot) if last_dot > 0 => {
                let dot = self.make_bare_node(SyntaxKind::DOT);
                let left = self.make_dot_node(&dotted[..last_dot]);
                let right = self.make_dot_node(&dotted[last_dot + 1..]);
                self.tree.push_child(dot, left);
                self.tree.push_child(dot, right);
                dot
            }
            _ => self.tree.new_node(SyntaxKind::IDENT, dotted),
        }
    }

    pub fn make_bare_node(&mut self, kind: SyntaxKind) -> NodeId {
        self.tree.new_node(kind, kind.canonical_text())
    }

    /// Inserts `import <qualified_name>` after the package declaration of
    /// `file_node`, or first when there is none.
    pub fn add_import(&mut self, file_node: NodeId, qualified_name: &str) -> NodeId {
        let import = self.make_import_node(qualified_name);
        let mut anchor = self.tree.first_child(file_node);
        if let Some(node) = anchor
            && self.tree.kind(node) == SyntaxKind::PACKAGE_DEF
        {
            anchor = self.tree.next_sibling(node);
        }

        self.add_dirty_file(file_node);
        match anchor {
            Some(anchor) => self.tree.insert_before(anchor, import),
            None => self.tree.push_child(file_node, import),
        }
        import
    }

    /// The nearest statement or local declaration at or above `node`.
    pub fn find_enclosing_statement(&self, node: NodeId) -> Result<NodeId, EditError> {
        self.enclosing_statement(node).ok_or(EditError::NoStatement(node))
    }

    /// The nearest enclosing statement of `node` that also lies in the
    /// sibling list running forward from `boundary`.
    ///
    /// Used to find the statement at the same nesting level as an insertion
    /// anchor.
    pub fn find_enclosing_statement_from(
        &self,
        node: NodeId,
        boundary: NodeId,
    ) -> Result<NodeId, EditError> {
        let mut candidate = self.find_enclosing_statement(node)?;
        loop {
            let mut siblings = std::iter::once(boundary).chain(self.tree.children_after(boundary));
            if siblings.any(|it| it == candidate) {
                return Ok(candidate);
            }
            candidate = self
                .tree
                .parent(candidate)
                .and_then(|parent| self.enclosing_statement(parent))
                .ok_or(EditError::NoStatement(node))?;
        }
    }

    fn enclosing_statement(&self, node: NodeId) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.tree.ancestors(node))
            .find(|&it| STATEMENT_KINDS.contains(self.tree.kind(it)))
    }

    /// The first assignment to the variable declared by `definition`: its
    /// initializer, or else the first of `references` that is the target of
    /// an `ASSIGN`.
    pub fn first_assignment_to(
        &self,
        definition: NodeId,
        references: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId, EditError> {
        self.tree
            .first_child_of_kind(definition, SyntaxKind::ASSIGN)
            .or_else(|| {
                references
                    .into_iter()
                    .filter_map(|reference| self.tree.parent(reference))
                    .find(|&parent| self.tree.kind(parent) == SyntaxKind::ASSIGN)
            })
            .ok_or(EditError::NoAssignment(definition))
    }

    pub fn lhs_of(&self, expr: NodeId) -> Option<NodeId> {
        self.tree.first_child(expr)
    }

    /// The operand after the left-hand side, unwrapped from a redundant
    /// `EXPR` node. Single-operand expressions (`int x = 4;`) report the
    /// left-hand side itself.
    pub fn rhs_of(&self, expr: NodeId) -> Option<Rhs> {
        let lhs = self.lhs_of(expr)?;
        let rhs = match self.tree.next_sibling(lhs) {
            Some(rhs) => Rhs::Distinct(self.unwrap_expr(rhs)),
            None => Rhs::SameAsLhs(self.unwrap_expr(lhs)),
        };
        Some(rhs)
    }

    fn unwrap_expr(&self, node: NodeId) -> NodeId {
        match self.tree.kind(node) {
            SyntaxKind::EXPR => self.tree.first_child(node).unwrap_or(node),
            _ => node,
        }
    }

    fn expect_parent(&self, node: NodeId) -> Result<NodeId, EditError> {
        self.tree.parent(node).ok_or(EditError::Detached(node))
    }
}

impl SyntaxTree {
    /// The siblings that follow `node`, not including `node`.
    pub fn children_after(&self, node: NodeId) -> crate::Children<'_> {
        crate::Children::new(self, self.next_sibling(node))
    }
}
