//! The mutable style-sheet tree.
//!
//! [`Stylesheet`] owns every node in an [`indextree::Arena`] and hands out
//! [`NodeId`]s. Ids stay valid while other nodes are inserted or removed around
//! them, which is what lets a plugin insert siblings next to the declaration it
//! is visiting without disturbing the walk (see [`Processor`](crate::Processor)).
//!
//! # Example
//!
//! ```rust
//! use duotone_sheet::{Node, Stylesheet};
//!
//! let mut sheet = Stylesheet::parse("a { color: red }").unwrap();
//! let decl = sheet.declarations()[0];
//!
//! sheet.clone_before(decl, |node| {
//!     if let Some(d) = node.as_declaration_mut() {
//!         d.prop = "--accent".into();
//!     }
//! });
//!
//! assert_eq!(sheet.to_css(), "a { --accent: red; color: red }");
//! ```

use indextree::{Arena, NodeId};

use crate::error::SheetError;
use crate::node::{Declaration, Node, NodeKind};
use crate::parser::parse_into;
use crate::stringify::stringify;

/// A parsed style sheet.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    arena: Arena<Node>,
    root: NodeId,
}

/// Selectors enclosing a node, as returned by [`Stylesheet::rule_ancestors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleAncestors {
    /// Selectors of every enclosing rule, outermost first.
    pub selectors: Vec<String>,
    /// At-rules nested inside those rules, outermost first.
    pub at_rules: Vec<NodeId>,
    /// The parent of the outermost rule (the root or an at-rule). Without
    /// enclosing rules, the node's nearest at-rule or the root.
    pub container: NodeId,
}

impl Stylesheet {
    /// Creates an empty style sheet.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Node::root());
        Self { arena, root }
    }

    /// Parses CSS source text.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Parse`] for a declaration without a colon or a
    /// stray closing brace.
    pub fn parse(css: &str) -> Result<Self, SheetError> {
        let mut arena = Arena::new();
        let root = parse_into(css, &mut arena)?;
        Ok(Self { arena, root })
    }

    /// Serializes the tree back to CSS.
    pub fn to_css(&self) -> String {
        stringify(&self.arena, self.root)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node, or `None` if it was removed.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_removed(&self.arena) {
            return None;
        }
        self.arena.get(id).map(|n| n.get())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_removed(&self.arena) {
            return None;
        }
        self.arena.get_mut(id).map(|n| n.get_mut())
    }

    pub fn declaration(&self, id: NodeId) -> Option<&Declaration> {
        self.get(id).and_then(Node::as_declaration)
    }

    pub fn declaration_mut(&mut self, id: NodeId) -> Option<&mut Declaration> {
        self.get_mut(id).and_then(Node::as_declaration_mut)
    }

    pub fn is_removed(&self, id: NodeId) -> bool {
        id.is_removed(&self.arena)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.parent())
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// All declaration ids in source order.
    ///
    /// This is a snapshot: declarations inserted afterwards are not included.
    pub fn declarations(&self) -> Vec<NodeId> {
        self.root
            .descendants(&self.arena)
            .filter(|id| matches!(self.arena[*id].get().kind, NodeKind::Declaration(_)))
            .collect()
    }

    /// Adds `node` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.arena.new_node(node);
        parent.append(id, &mut self.arena);
        id
    }

    /// Adds `node` as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.arena.new_node(node);
        parent.prepend(id, &mut self.arena);
        id
    }

    /// Inserts `node` as the sibling immediately preceding `reference`.
    pub fn insert_before(&mut self, reference: NodeId, node: Node) -> NodeId {
        let id = self.arena.new_node(node);
        reference.insert_before(id, &mut self.arena);
        id
    }

    /// Inserts `node` as the sibling immediately following `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: Node) -> NodeId {
        let id = self.arena.new_node(node);
        reference.insert_after(id, &mut self.arena);
        id
    }

    /// Appends `node` under `parent` and fills it with `children`.
    pub fn append_tree(&mut self, parent: NodeId, node: Node, children: Vec<Node>) -> NodeId {
        let id = self.append(parent, node);
        for child in children {
            self.append(id, child);
        }
        id
    }

    /// Copies `id` (with its subtree), lets `edit` adjust the copy, and inserts
    /// it immediately before the original.
    ///
    /// Returns `None` if `id` was removed or is the root.
    pub fn clone_before(&mut self, id: NodeId, edit: impl FnOnce(&mut Node)) -> Option<NodeId> {
        if id == self.root || self.is_removed(id) {
            return None;
        }
        let copy = self.copy_subtree(id);
        if let Some(node) = self.arena.get_mut(copy) {
            edit(node.get_mut());
        }
        id.insert_before(copy, &mut self.arena);
        Some(copy)
    }

    /// Returns a copy of `id`'s node with `edit` applied, without inserting it.
    pub fn clone_node(&self, id: NodeId, edit: impl FnOnce(&mut Node)) -> Option<Node> {
        let mut node = self.get(id)?.clone();
        edit(&mut node);
        Some(node)
    }

    /// Puts `node` where `id` was and removes `id` (with its subtree).
    pub fn replace_with(&mut self, id: NodeId, node: Node) -> NodeId {
        let new = self.insert_before(id, node);
        self.remove(id);
        new
    }

    /// Removes `id` and its subtree. Removing twice is a no-op.
    pub fn remove(&mut self, id: NodeId) {
        if id != self.root && !self.is_removed(id) {
            id.remove_subtree(&mut self.arena);
        }
    }

    /// Collects the selectors of the rules enclosing `id`, looking through
    /// at-rules nested inside them.
    ///
    /// For `@media screen { a { @media print { b { color: red } } } }` the
    /// declaration has selectors `a`, `b`, the `print` at-rule in between and
    /// the `screen` at-rule as container.
    pub fn rule_ancestors(&self, id: NodeId) -> RuleAncestors {
        let mut selectors = Vec::new();
        let mut at_rules = Vec::new();
        // At-rules above the innermost rule seen so far.
        let mut pending = Vec::new();
        for ancestor in id.ancestors(&self.arena).skip(1) {
            match &self.arena[ancestor].get().kind {
                NodeKind::Rule { selector } => {
                    selectors.push(selector.clone());
                    at_rules.append(&mut pending);
                }
                NodeKind::AtRule { .. } => pending.push(ancestor),
                _ => {}
            }
        }
        let container = pending.first().copied().unwrap_or(self.root);
        selectors.reverse();
        at_rules.reverse();
        RuleAncestors {
            selectors,
            at_rules,
            container,
        }
    }

    fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let node = self.arena[id].get().clone();
        let copy = self.arena.new_node(node);
        let children: Vec<NodeId> = id.children(&self.arena).collect();
        for child in children {
            let child_copy = self.copy_subtree(child);
            copy.append(child_copy, &mut self.arena);
        }
        copy
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}
