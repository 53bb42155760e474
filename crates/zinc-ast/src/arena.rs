//! AST arena for node storage and traversal.
//!
//! All nodes of one translation unit live in a single arena and are addressed
//! by [`NodeID`] handles. Dropping the arena releases every node at once,
//! which is exactly the lifetime the document layer wants: a re-parse builds
//! a fresh arena and the old one is discarded wholesale.

use zinc_source::types::Span;

use crate::nodes::{AnyNode, NodeID, NodeKind};

/// A single node in the arena.
///
/// The header fields (`kind`, `span`, `parent`) are common to every node;
/// `data` carries the variant-specific payload. `kind` is derived from
/// `data` at allocation time, so the tag always matches the payload.
#[derive(Debug, Clone)]
pub struct Node {
    /// The kind tag of this node.
    pub kind: NodeKind,
    /// The span of this node in the source code.
    pub span: Span,
    /// The parent node, if any. The root's parent is `None`.
    pub parent: Option<NodeID>,
    /// The variant-specific payload.
    pub data: AnyNode,
}

/// An arena of AST nodes addressed by [`NodeID`].
#[derive(Debug, Clone, Default)]
pub struct Ast {
    /// Node storage; a `NodeID` is an index into this vector.
    nodes: Vec<Node>,
    /// The root node of the AST, if any.
    root: Option<NodeID>,
}

impl Ast {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self { Self { nodes: Vec::new(), root: None } }

    /// Creates a new arena with the given initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Vec::with_capacity(capacity), root: None }
    }

    /// Sets the root node of the AST.
    pub const fn set_root(&mut self, root: NodeID) { self.root = Some(root); }

    /// Returns the root node of the AST, if any.
    #[must_use]
    pub const fn root(&self) -> Option<NodeID> { self.root }

    /// Allocates a new node and returns its handle.
    ///
    /// The node's kind tag is derived from the payload. The parent link
    /// starts out empty and is wired by [`Ast::set_parent`] when the node is
    /// attached to its parent.
    pub fn alloc(&mut self, data: AnyNode, span: Span) -> NodeID {
        let id = NodeID::new(self.nodes.len() as u32);
        let kind = data.kind();
        self.nodes.push(Node { kind, span, parent: None, data });

        id
    }

    /// Gets a reference to a node by its handle.
    #[must_use]
    pub fn get(&self, id: NodeID) -> Option<&Node> { self.nodes.get(id.index() as usize) }

    /// Gets a mutable reference to a node by its handle.
    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut Node> {
        self.nodes.get_mut(id.index() as usize)
    }

    /// Attaches a child to a parent by setting the child's parent link.
    ///
    /// This is the only way parent links are written; a node is attached
    /// exactly once, right after its parent has been allocated.
    pub fn set_parent(&mut self, child: NodeID, parent: NodeID) -> bool {
        if let Some(node) = self.nodes.get_mut(child.index() as usize) {
            node.parent = Some(parent);
            return true;
        }

        false
    }

    /// Gets the parent of a node, if any.
    #[must_use]
    pub fn parent_of(&self, id: NodeID) -> Option<NodeID> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn node_count(&self) -> usize { self.nodes.len() }

    /// Iterates over all `(NodeID, &Node)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeID, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeID::new(i as u32), node))
    }

    /// Performs a pre-order traversal starting from the given node.
    ///
    /// Returns true if the traversal completed, false if the visitor aborted
    /// it by returning false.
    pub fn traverse_pre_order<F>(&self, node_id: NodeID, visit_fn: &mut F) -> bool
    where F: FnMut(NodeID) -> bool {
        if !visit_fn(node_id) {
            return false;
        }

        let Some(node) = self.get(node_id) else { return false };

        for child_id in node.data.children() {
            if !self.traverse_pre_order(child_id, visit_fn) {
                return false;
            }
        }

        true
    }

    /// Finds the first node matching a predicate in pre-order.
    pub fn find_node<F>(&self, start_node: NodeID, mut pred: F) -> Option<NodeID>
    where F: FnMut(NodeID) -> bool {
        let mut result = None;

        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            if pred(node_id) {
                result = Some(node_id);
                false
            } else {
                true
            }
        });

        result
    }

    /// Finds all nodes of a specific kind under `start_node` in pre-order.
    #[must_use]
    pub fn find_nodes_of_kind(&self, start_node: NodeID, kind: NodeKind) -> Vec<NodeID> {
        let mut result = Vec::new();

        let _ = self.traverse_pre_order(start_node, &mut |node_id| {
            if self.get(node_id).is_some_and(|node| node.kind == kind) {
                result.push(node_id);
            }
            true
        });

        result
    }

    /// Finds the most specific node whose span contains the given offset.
    ///
    /// Returns `None` when the offset falls outside `node_id`'s half-open
    /// span. Otherwise recurses into the node's children; among children
    /// containing the offset the last-visited one wins, making the result
    /// deterministic when zero-width or touching spans overlap a point. If
    /// no child contains the offset, the node itself is returned.
    #[must_use]
    pub fn deepest_at_offset(&self, node_id: NodeID, offset: usize) -> Option<NodeID> {
        let node = self.get(node_id)?;
        if !node.span.contains(offset) {
            return None;
        }

        let mut found = None;
        for child_id in node.data.children() {
            if let Some(hit) = self.deepest_at_offset(child_id, offset) {
                found = Some(hit);
            }
        }

        Some(found.unwrap_or(node_id))
    }
}
