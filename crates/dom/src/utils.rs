//! Utility functions for document processing

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::NodeId;

/// Cap text length for diagnostics, to keep log lines readable
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        text.to_string()
    } else {
        let mut end = max_len;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}

/// Get all text content from a node and its descendants, in document order
///
/// The result is the exact concatenation of every text node's content: no
/// trimming, no separators. Anchoring offsets are computed against this
/// stream, so it must stay byte-for-byte faithful.
pub fn text_content(arena: &DomArena, node_id: NodeId) -> Result<String> {
    let mut text = String::new();

    arena.traverse_df(node_id, |node| {
        if node.is_text() {
            text.push_str(&node.node_value);
        }
        Ok(())
    })?;

    Ok(text)
}
