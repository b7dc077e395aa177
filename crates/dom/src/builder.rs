//! Document construction - JSON snapshots and programmatic building
//!
//! Rendering hosts hand the engine a snapshot of the rendered tree as JSON:
//!
//! ```json
//! {
//!   "nodeType": 1,
//!   "nodeName": "article",
//!   "attributes": {"id": "content"},
//!   "children": [
//!     {"nodeType": 3, "nodeValue": "hello "},
//!     {"nodeType": 1, "nodeName": "em",
//!      "children": [{"nodeType": 3, "nodeValue": "world"}]}
//!   ]
//! }
//! ```
//!
//! The builder turns that into an arena. It also offers direct `element` /
//! `text` construction, which is what tests and embedding hosts without a
//! JSON hand-off use.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};
use serde_json::Value;

/// Builds a `DomArena` node by node
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    arena: DomArena,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            arena: DomArena::new(),
        }
    }

    /// Create the root element and register it as the arena root
    pub fn root(&mut self, name: &str) -> NodeId {
        let node = DomNode::new(
            self.arena.len() as NodeId,
            NodeType::Element,
            name.to_string(),
        );
        let id = self.arena.add_node(node);
        // Cannot fail: the node was just added
        let _ = self.arena.set_root(id);
        id
    }

    /// Append an element under `parent`
    pub fn element(&mut self, name: &str, parent: NodeId) -> NodeId {
        self.element_with_attrs(name, &[], parent)
    }

    /// Append an element with attributes under `parent`
    pub fn element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        parent: NodeId,
    ) -> NodeId {
        let mut node = DomNode::new(
            self.arena.len() as NodeId,
            NodeType::Element,
            name.to_string(),
        );
        for (key, value) in attrs {
            node.attributes.insert(key.to_string(), value.to_string());
        }
        self.append(node, parent)
    }

    /// Append a text node under `parent`
    pub fn text(&mut self, value: &str, parent: NodeId) -> NodeId {
        let node = DomNode::text(self.arena.len() as NodeId, value.to_string());
        self.append(node, parent)
    }

    /// Append a comment node under `parent`
    pub fn comment(&mut self, value: &str, parent: NodeId) -> NodeId {
        let mut node = DomNode::new(
            self.arena.len() as NodeId,
            NodeType::Comment,
            "#comment".to_string(),
        );
        node.node_value = value.to_string();
        self.append(node, parent)
    }

    fn append(&mut self, mut node: DomNode, parent: NodeId) -> NodeId {
        node.parent_id = Some(parent);
        let id = self.arena.add_node(node);
        if let Ok(parent_node) = self.arena.get_mut(parent) {
            parent_node.children_ids.push(id);
        }
        id
    }

    /// Parse a JSON node snapshot into the arena and make it the root
    pub fn parse_node_snapshot(&mut self, snapshot: &Value) -> Result<NodeId> {
        self.arena.clear();
        let root_id = self.parse_node(snapshot, None)?;
        self.arena.set_root(root_id)?;
        Ok(root_id)
    }

    /// Recursively parse one snapshot node
    fn parse_node(&mut self, json: &Value, parent_id: Option<NodeId>) -> Result<NodeId> {
        let node_type_val = json["nodeType"]
            .as_u64()
            .ok_or_else(|| DomError::SnapshotError("missing nodeType".to_string()))?
            as u8;

        let node_type =
            NodeType::from_u8(node_type_val).ok_or_else(|| DomError::InvalidNodeType {
                expected: "valid NodeType".to_string(),
                actual: format!("{}", node_type_val),
            })?;

        let node_name = json["nodeName"]
            .as_str()
            .unwrap_or(match node_type {
                NodeType::Text => "#text",
                NodeType::Comment => "#comment",
                NodeType::Document => "#document",
                _ => "",
            })
            .to_string();

        let mut node = DomNode::new(self.arena.len() as NodeId, node_type, node_name);
        node.node_value = json["nodeValue"].as_str().unwrap_or("").to_string();
        node.parent_id = parent_id;

        if let Some(attrs) = json["attributes"].as_object() {
            for (key, value) in attrs {
                if let Some(value) = value.as_str() {
                    node.attributes.insert(key.clone(), value.to_string());
                }
            }
        }

        let current_id = self.arena.add_node(node);

        if let Some(children) = json["children"].as_array() {
            let mut child_ids = smallvec::SmallVec::new();

            for child in children {
                let child_id = self.parse_node(child, Some(current_id))?;
                child_ids.push(child_id);
            }

            if let Ok(node) = self.arena.get_mut(current_id) {
                node.children_ids = child_ids;
            }
        }

        Ok(current_id)
    }

    /// Finish building and hand over the arena
    pub fn finish(self) -> DomArena {
        self.arena
    }

    /// Borrow the arena under construction
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// One-shot: snapshot JSON straight to an arena
    pub fn from_snapshot(snapshot: &Value) -> Result<DomArena> {
        let mut builder = Self::new();
        builder.parse_node_snapshot(snapshot)?;
        Ok(builder.finish())
    }
}
