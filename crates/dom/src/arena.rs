//! Arena-based document tree storage
//!
//! The arena eliminates:
//! - Rc/Arc overhead (16 bytes per pointer)
//! - Recursive function calls (stack overflow risk)
//! - Cache misses (nodes stored sequentially)
//!
//! Nodes are addressed by `NodeId` (a 4-byte index), and the tree is walked
//! iteratively in document order. Anchoring code relies on that order being
//! stable for a given tree.

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};
use ahash::AHashMap;

/// Arena allocator for document nodes
///
/// Design:
/// - Single Vec<DomNode> for sequential allocation
/// - HashMap for `id` attribute → NodeId lookup (annotation callers scope
///   their container by element id)
/// - No Rc/Arc: use indices everywhere
#[derive(Debug)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// `id` attribute → NodeId lookup
    id_index: AHashMap<String, NodeId>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(256),
            id_index: AHashMap::new(),
            root_id: None,
        }
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            id_index: AHashMap::with_capacity(capacity / 8),
            root_id: None,
        }
    }

    /// Add a node to the arena, returns its ID
    ///
    /// The node's `node_id` field is overwritten with the assigned index, so
    /// a visited node always knows its own address.
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;
        if let Some(id_attr) = node.attr("id") {
            self.id_index.insert(id_attr.to_string(), node_id);
        }
        self.nodes.push(node);
        node_id
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Set root node
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        // Verify node exists
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Get children of a node
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Traverse subtree depth-first in document order (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Find nodes matching predicate
    pub fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| {
                if predicate(node) {
                    Some(idx as NodeId)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Find first node matching predicate
    pub fn find_one<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes.iter().enumerate().find_map(|(idx, node)| {
            if predicate(node) {
                Some(idx as NodeId)
            } else {
                None
            }
        })
    }

    /// Find all elements by tag name
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find(|node| {
            node.node_type == NodeType::Element && node.node_name.eq_ignore_ascii_case(tag)
        })
    }

    /// Find element by ID attribute
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Clear arena (reuse allocation)
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.id_index.clear();
        self.root_id = None;
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
