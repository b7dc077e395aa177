//! Whitespace normalization with position mapping
//!
//! Annotation quotes are captured from rendered text, where whitespace run
//! lengths can differ from the flattened node stream (inline markup
//! boundaries, reflowed indentation). Collapsing every whitespace run to a
//! single space on both sides makes such quotes comparable again; the
//! position map carries match offsets back into the original string.

/// Collapse whitespace runs and map collapsed positions to original ones
///
/// Every maximal run of whitespace becomes one `' '`, mapped to the byte
/// offset of the run's first whitespace character. Non-whitespace bytes map
/// one-to-one. One trailing sentinel entry equal to `text.len()` resolves
/// end-of-text offsets, so `map.len() == collapsed.len() + 1` always holds.
pub fn collapse_whitespace(text: &str) -> (String, Vec<usize>) {
    let mut collapsed = String::with_capacity(text.len());
    let mut map = Vec::with_capacity(text.len() + 1);

    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch.is_whitespace() {
            collapsed.push(' ');
            map.push(idx);
            while let Some(&(_, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                chars.next();
            }
        } else {
            let len = ch.len_utf8();
            for byte in 0..len {
                map.push(idx + byte);
            }
            collapsed.push(ch);
        }
    }

    map.push(text.len());
    (collapsed, map)
}

/// Collapse whitespace without building the map (for selector parts)
pub fn collapse_only(text: &str) -> String {
    collapse_whitespace(text).0
}
