//! Rendered-document tree model
//!
//! An arena-backed node tree standing in for the host's rendered DOM, plus
//! the Range primitive annotation anchoring resolves into.
//!
//! ## Core Design
//!
//! ```text
//! JSON snapshot → DocumentBuilder → DomArena (owned) → traversal / ranges
//!                                        ↓
//!                                  NodeId (u32)
//! ```
//!
//! The arena never reorders nodes, so document order is stable for a given
//! tree and byte offsets computed against its text remain meaningful until
//! the tree is rebuilt.

pub mod arena;
pub mod builder;
pub mod error;
pub mod range;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use builder::DocumentBuilder;
pub use error::{DomError, Result};
pub use range::DomRange;
pub use types::{DomNode, NodeId, NodeType};
