//! Range over the document tree
//!
//! A `DomRange` marks a contiguous run of text between two boundaries, each a
//! (text node, byte offset) pair. This is the addressable span primitive that
//! highlight code consumes: anchoring produces a range, the host wraps the
//! spanned text in highlight markup.
//!
//! Boundaries are validated against the arena when set. A range holds plain
//! ids and offsets, so it goes stale if the tree is rebuilt; extraction is
//! checked and fails rather than panicking on a stale range.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::NodeId;

/// A span of text between two (node, offset) boundaries
///
/// Offsets are UTF-8 byte offsets into the node's text. The start boundary
/// must not come after the end boundary in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomRange {
    start_node: NodeId,
    start_offset: usize,
    end_node: NodeId,
    end_offset: usize,
}

impl DomRange {
    /// Create a range from validated boundaries
    pub fn new(
        arena: &DomArena,
        start_node: NodeId,
        start_offset: usize,
        end_node: NodeId,
        end_offset: usize,
    ) -> Result<Self> {
        let mut range = Self {
            start_node,
            start_offset,
            end_node,
            end_offset,
        };
        // Validate through the setters so both construction paths share the
        // same checks
        range.set_start(arena, start_node, start_offset)?;
        range.set_end(arena, end_node, end_offset)?;
        Ok(range)
    }

    /// Move the start boundary
    pub fn set_start(&mut self, arena: &DomArena, node: NodeId, offset: usize) -> Result<()> {
        validate_boundary(arena, node, offset)?;
        self.start_node = node;
        self.start_offset = offset;
        self.check_order(arena)
    }

    /// Move the end boundary
    pub fn set_end(&mut self, arena: &DomArena, node: NodeId, offset: usize) -> Result<()> {
        validate_boundary(arena, node, offset)?;
        self.end_node = node;
        self.end_offset = offset;
        self.check_order(arena)
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// True when both boundaries coincide
    pub fn is_collapsed(&self) -> bool {
        self.start_node == self.end_node && self.start_offset == self.end_offset
    }

    /// Extract the spanned text, walking text nodes in document order
    ///
    /// Fails with `InvalidRange`/`InvalidOffset` if the range no longer maps
    /// onto the current tree (e.g. after a rebuild).
    pub fn text(&self, arena: &DomArena) -> Result<String> {
        let root = arena
            .root_id()
            .ok_or_else(|| DomError::InvalidRange("arena has no root".to_string()))?;

        let mut out = String::new();
        let mut in_range = false;
        let mut stack = vec![root];

        while let Some(node_id) = stack.pop() {
            let node = arena.get(node_id)?;

            if node.is_text() {
                if node_id == self.start_node && node_id == self.end_node {
                    let slice = node
                        .node_value
                        .get(self.start_offset..self.end_offset)
                        .ok_or(DomError::InvalidOffset {
                            node: node_id,
                            offset: self.end_offset,
                            len: node.text_len(),
                        })?;
                    out.push_str(slice);
                    return Ok(out);
                } else if node_id == self.start_node {
                    let slice = node.node_value.get(self.start_offset..).ok_or(
                        DomError::InvalidOffset {
                            node: node_id,
                            offset: self.start_offset,
                            len: node.text_len(),
                        },
                    )?;
                    out.push_str(slice);
                    in_range = true;
                } else if node_id == self.end_node {
                    let slice =
                        node.node_value
                            .get(..self.end_offset)
                            .ok_or(DomError::InvalidOffset {
                                node: node_id,
                                offset: self.end_offset,
                                len: node.text_len(),
                            })?;
                    out.push_str(slice);
                    return Ok(out);
                } else if in_range {
                    out.push_str(&node.node_value);
                }
            }

            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        // Both boundaries are text nodes, so a complete walk that never
        // returned means the range no longer maps onto this tree
        Err(DomError::InvalidRange(
            "range boundaries not found in document".to_string(),
        ))
    }

    /// Verify the start boundary does not come after the end boundary
    fn check_order(&self, arena: &DomArena) -> Result<()> {
        if self.start_node == self.end_node {
            if self.start_offset > self.end_offset {
                return Err(DomError::InvalidRange(format!(
                    "start offset {} after end offset {} in node {}",
                    self.start_offset, self.end_offset, self.start_node
                )));
            }
            return Ok(());
        }

        // Different nodes: the start node must precede the end node in
        // document order. Only check when a root is available to walk from.
        let Some(root) = arena.root_id() else {
            return Ok(());
        };
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            if node_id == self.start_node {
                return Ok(());
            }
            if node_id == self.end_node {
                return Err(DomError::InvalidRange(format!(
                    "end node {} precedes start node {}",
                    self.end_node, self.start_node
                )));
            }
            let node = arena.get(node_id)?;
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }
        // Neither boundary is reachable from the root
        Err(DomError::InvalidRange(format!(
            "nodes {} and {} not in document",
            self.start_node, self.end_node
        )))
    }
}

fn validate_boundary(arena: &DomArena, node_id: NodeId, offset: usize) -> Result<()> {
    let node = arena.get(node_id)?;
    if !node.is_text() {
        return Err(DomError::InvalidNodeType {
            expected: "Text".to_string(),
            actual: format!("{:?}", node.node_type),
        });
    }
    if offset > node.text_len() || !node.node_value.is_char_boundary(offset) {
        return Err(DomError::InvalidOffset {
            node: node_id,
            offset,
            len: node.text_len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;

    fn split_doc() -> (DomArena, Vec<NodeId>) {
        // <div><p>"hello "<em>"brave"</em>" world"</p></div>
        let mut builder = DocumentBuilder::new();
        let root = builder.root("div");
        let p = builder.element("p", root);
        let t1 = builder.text("hello ", p);
        let em = builder.element("em", p);
        let t2 = builder.text("brave", em);
        let t3 = builder.text(" world", p);
        (builder.finish(), vec![t1, t2, t3])
    }

    #[test]
    fn test_range_within_one_node() {
        let (arena, nodes) = split_doc();
        let range = DomRange::new(&arena, nodes[0], 0, nodes[0], 5).unwrap();
        assert_eq!(range.text(&arena).unwrap(), "hello");
        assert!(!range.is_collapsed());
    }

    #[test]
    fn test_range_across_nodes() {
        let (arena, nodes) = split_doc();
        // "lo brave wor"
        let range = DomRange::new(&arena, nodes[0], 3, nodes[2], 4).unwrap();
        assert_eq!(range.text(&arena).unwrap(), "lo brave wor");
    }

    #[test]
    fn test_collapsed_range() {
        let (arena, nodes) = split_doc();
        let range = DomRange::new(&arena, nodes[1], 2, nodes[1], 2).unwrap();
        assert!(range.is_collapsed());
        assert_eq!(range.text(&arena).unwrap(), "");
    }

    #[test]
    fn test_boundary_at_node_end() {
        let (arena, nodes) = split_doc();
        // Start collapsed at the end of the first node, end in the second
        let range = DomRange::new(&arena, nodes[0], 6, nodes[1], 5).unwrap();
        assert_eq!(range.text(&arena).unwrap(), "brave");
    }

    #[test]
    fn test_rejects_non_text_boundary() {
        let (arena, nodes) = split_doc();
        let root = arena.root_id().unwrap();
        let err = DomRange::new(&arena, root, 0, nodes[0], 1);
        assert!(matches!(err, Err(DomError::InvalidNodeType { .. })));
    }

    #[test]
    fn test_rejects_offset_past_end() {
        let (arena, nodes) = split_doc();
        let err = DomRange::new(&arena, nodes[0], 7, nodes[0], 7);
        assert!(matches!(err, Err(DomError::InvalidOffset { .. })));
    }

    #[test]
    fn test_rejects_reversed_boundaries() {
        let (arena, nodes) = split_doc();
        let same_node = DomRange::new(&arena, nodes[0], 4, nodes[0], 2);
        assert!(matches!(same_node, Err(DomError::InvalidRange(_))));

        let cross_node = DomRange::new(&arena, nodes[2], 0, nodes[0], 2);
        assert!(matches!(cross_node, Err(DomError::InvalidRange(_))));
    }

    #[test]
    fn test_rejects_non_char_boundary() {
        let mut builder = DocumentBuilder::new();
        let root = builder.root("p");
        let t = builder.text("héllo", root);
        let arena = builder.finish();
        // Offset 2 lands inside the two-byte 'é'
        let err = DomRange::new(&arena, t, 2, t, 3);
        assert!(matches!(err, Err(DomError::InvalidOffset { .. })));
    }
}
