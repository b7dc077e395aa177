//! Core type definitions for the rendered-document tree
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Use SmallVec for child lists (most nodes have few children)
//! 3. Nodes carry their text in `node_value`; elements are structure only

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any rendered document
pub type NodeId = u32;

/// Node type matching DOM specification numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }
}

/// A node in the rendered-document tree
///
/// Design:
/// - Use indices instead of pointers for navigation
/// - `node_value` holds the text of text/comment nodes, empty for elements
/// - `uuid` gives the node an identity that survives arena rebuilds, so
///   callers can correlate highlights across re-renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    /// Tag name for elements, "#text" / "#comment" / "#document" otherwise
    pub node_name: String,
    /// Text content for text-bearing nodes
    pub node_value: String,
    pub attributes: HashMap<String, String>,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children

    /// UUID for tracking across rebuilds
    pub uuid: String,
}

impl DomNode {
    /// Create a new node with required fields
    pub fn new(node_id: NodeId, node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id,
            node_type,
            node_name,
            node_value: String::new(),
            attributes: HashMap::new(),
            parent_id: None,
            children_ids: SmallVec::new(),
            uuid: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Create a text node holding `value`
    pub fn text(node_id: NodeId, value: String) -> Self {
        let mut node = Self::new(node_id, NodeType::Text, "#text".to_string());
        node.node_value = value;
        node
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Length of this node's text in bytes
    pub fn text_len(&self) -> usize {
        self.node_value.len()
    }
}
