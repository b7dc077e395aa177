//! Text flattening and offset bookkeeping
//!
//! Collapses a subtree's text nodes into one addressable coordinate space:
//! each non-empty text node owns a contiguous byte range of the flattened
//! string, in document order, regardless of how deeply inline markup nests.
//! The position list is the bridge both directions: global offset to
//! (node, local offset) and back.

use dom::{DomArena, NodeId};

/// One text node's slice of the flattened coordinate space
///
/// The full list is an exclusive, contiguous partition of `[0, total_len)`:
/// `positions[i].end == positions[i+1].start` and `positions[0].start == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNodePosition {
    pub node: NodeId,
    /// Start byte offset in the flattened string (inclusive)
    pub start: usize,
    /// End byte offset in the flattened string (exclusive)
    pub end: usize,
}

/// A global offset resolved to a node-local boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePosition {
    pub node: NodeId,
    /// Byte offset within the node's text
    pub offset: usize,
}

/// Collect every non-empty text node under `root` in document order
///
/// Elements, comments and other non-text nodes are transparent: their text
/// descendants are visited, they themselves contribute nothing. Zero-length
/// text nodes are skipped; they cannot host a non-empty match and would
/// only add degenerate records.
///
/// Returns an empty list when `root` does not exist in the arena.
pub fn collect_text_nodes(arena: &DomArena, root: NodeId) -> Vec<TextNodePosition> {
    let mut positions = Vec::new();
    let mut cursor = 0usize;

    let walk = arena.traverse_df(root, |node| {
        if node.is_text() && !node.node_value.is_empty() {
            let len = node.node_value.len();
            positions.push(TextNodePosition {
                node: node.node_id,
                start: cursor,
                end: cursor + len,
            });
            cursor += len;
        }
        Ok(())
    });

    if walk.is_err() {
        return Vec::new();
    }
    positions
}

/// Reconstruct the flattened string from a position list
///
/// Equals the plain concatenation of the visited nodes' text, with no
/// separators inserted.
pub fn build_text_from_positions(arena: &DomArena, positions: &[TextNodePosition]) -> String {
    let capacity = positions.last().map(|p| p.end).unwrap_or(0);
    let mut text = String::with_capacity(capacity);
    for position in positions {
        if let Ok(node) = arena.get(position.node) {
            text.push_str(&node.node_value);
        }
    }
    text
}

/// Resolve a global offset to a (node, local offset) boundary
///
/// Containment is inclusive on both ends so boundaries at the very end of a
/// node are addressable (`set_end(node, len)` is a valid range boundary).
/// When two adjacent records share the offset, the earlier node wins. An
/// offset at or past the end of the last node resolves to the end of that
/// node, which handles end-of-text matches. `None` only when the list is
/// empty.
pub fn offset_to_node_position(
    positions: &[TextNodePosition],
    offset: usize,
) -> Option<NodePosition> {
    for position in positions {
        if offset >= position.start && offset <= position.end {
            return Some(NodePosition {
                node: position.node,
                offset: offset - position.start,
            });
        }
    }

    let last = positions.last()?;
    if offset >= last.end {
        return Some(NodePosition {
            node: last.node,
            offset: last.end - last.start,
        });
    }
    None
}
