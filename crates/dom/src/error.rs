//! Error types for document-tree operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Invalid offset {offset} in node {node} (text length {len})")]
    InvalidOffset { node: u32, offset: usize, len: usize },

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
