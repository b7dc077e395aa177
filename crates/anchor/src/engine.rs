//! Quote anchoring - the public entry points
//!
//! Ties the pipeline together: flatten the container's text, run the
//! matcher, pick a match, resolve its offsets to node boundaries and build
//! the range. Everything is recomputed per call: a mutated tree is simply
//! seen as it stands on the next call, with no invalidation logic.
//!
//! Failures degrade to `None` (or a skipped entry for find-all) with a
//! diagnostic log line. Highlight code calls this once per annotation during
//! a render pass; one stale annotation must not abort the pass.

use crate::flatten::{
    build_text_from_positions, collect_text_nodes, offset_to_node_position, TextNodePosition,
};
use crate::matching::{find_matches, MatchDescriptor};
use crate::selector::TextQuoteSelector;
use dom::utils::cap_text_length;
use dom::{DomArena, DomRange, NodeId};

/// Options for quote lookup
#[derive(Debug, Clone)]
pub struct QuoteOptions {
    /// Which accepted match to anchor (0 = first)
    pub match_index: usize,
    /// Match against whitespace-collapsed text from the start, instead of
    /// only as a fallback
    pub normalize_whitespace: bool,
    /// Reject the lookup instead of guessing when the quote is ambiguous
    pub require_unique: bool,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self {
            match_index: 0,
            normalize_whitespace: false,
            require_unique: false,
        }
    }
}

/// A located quote
#[derive(Debug, Clone)]
pub struct TextQuoteMatch {
    /// Range bounding exactly the located quote text
    pub range: DomRange,
    /// The `[full_start, full_end)` slice of the original flattened text:
    /// matched prefix through matched suffix
    pub full_text: String,
    /// Start of the exact text in the flattened string. Stays meaningful as
    /// a numeric anchor after the range itself goes stale.
    pub text_start: usize,
    /// End of the exact text in the flattened string
    pub text_end: usize,
}

/// Locate a quote under `container` and build a range for it
///
/// Runs the cheap exact scan first and retries with whitespace
/// normalization only when that finds nothing (unless normalization was
/// requested up front). Returns `None` when the quote cannot be anchored:
/// empty exact text, no text under the container, no match after the
/// fallback, ambiguity under `require_unique`, an out-of-bounds
/// `match_index`, or a range that fails to build.
pub fn find_text_quote(
    arena: &DomArena,
    container: NodeId,
    selector: &TextQuoteSelector,
    options: &QuoteOptions,
) -> Option<TextQuoteMatch> {
    if selector.exact.is_empty() {
        return None;
    }

    let positions = collect_text_nodes(arena, container);
    if positions.is_empty() {
        return None;
    }
    let text = build_text_from_positions(arena, &positions);

    let matches = run_matcher(&text, selector, options.normalize_whitespace);
    if matches.is_empty() {
        return None;
    }

    if options.require_unique && matches.len() > 1 {
        tracing::warn!(
            "quote \"{}\" is ambiguous: {} occurrences",
            cap_text_length(&selector.exact, 40),
            matches.len()
        );
        return None;
    }

    let Some(m) = matches.get(options.match_index) else {
        tracing::warn!(
            "match index {} out of bounds ({} matches for \"{}\")",
            options.match_index,
            matches.len(),
            cap_text_length(&selector.exact, 40)
        );
        return None;
    };

    match resolve_match(arena, &positions, &text, m) {
        Ok(found) => Some(found),
        Err(reason) => {
            tracing::warn!(
                "failed to build range for quote at {}..{}: {}",
                m.exact_start,
                m.exact_end,
                reason
            );
            None
        }
    }
}

/// Locate every occurrence of a quote under `container`
///
/// Same pipeline as [`find_text_quote`], including the automatic
/// normalization fallback, but without selection or uniqueness policy: every
/// accepted match becomes an independent result. A match whose offsets fail
/// to resolve is skipped, not fatal.
pub fn find_all_text_quotes(
    arena: &DomArena,
    container: NodeId,
    selector: &TextQuoteSelector,
    options: &QuoteOptions,
) -> Vec<TextQuoteMatch> {
    if selector.exact.is_empty() {
        return Vec::new();
    }

    let positions = collect_text_nodes(arena, container);
    if positions.is_empty() {
        return Vec::new();
    }
    let text = build_text_from_positions(arena, &positions);

    let matches = run_matcher(&text, selector, options.normalize_whitespace);

    matches
        .iter()
        .filter_map(|m| match resolve_match(arena, &positions, &text, m) {
            Ok(found) => Some(found),
            Err(reason) => {
                tracing::debug!(
                    "skipping quote match at {}..{}: {}",
                    m.exact_start,
                    m.exact_end,
                    reason
                );
                None
            }
        })
        .collect()
}

/// Exact scan with the normalized retry
///
/// Two-phase escalation, not a retry framework: the domain has exactly two
/// matching modes, and the tolerant one costs a full collapse of the text.
fn run_matcher(
    text: &str,
    selector: &TextQuoteSelector,
    normalize_whitespace: bool,
) -> Vec<MatchDescriptor> {
    let matches = find_matches(text, selector, normalize_whitespace);
    if matches.is_empty() && !normalize_whitespace {
        return find_matches(text, selector, true);
    }
    matches
}

/// Map a descriptor's offsets onto the tree and build the result
fn resolve_match(
    arena: &DomArena,
    positions: &[TextNodePosition],
    text: &str,
    m: &MatchDescriptor,
) -> Result<TextQuoteMatch, String> {
    let start = offset_to_node_position(positions, m.exact_start)
        .ok_or_else(|| "start offset resolves to no node".to_string())?;
    let end = offset_to_node_position(positions, m.exact_end)
        .ok_or_else(|| "end offset resolves to no node".to_string())?;

    let range = DomRange::new(arena, start.node, start.offset, end.node, end.offset)
        .map_err(|e| e.to_string())?;

    let full_text = text
        .get(m.full_start..m.full_end)
        .ok_or_else(|| "full span exceeds text".to_string())?
        .to_string();

    Ok(TextQuoteMatch {
        range,
        full_text,
        text_start: m.exact_start,
        text_end: m.exact_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::DocumentBuilder;

    fn doc(paragraphs: &[&str]) -> DomArena {
        let mut builder = DocumentBuilder::new();
        let root = builder.root("article");
        for text in paragraphs {
            let p = builder.element("p", root);
            builder.text(text, p);
        }
        builder.finish()
    }

    fn root(arena: &DomArena) -> NodeId {
        arena.root_id().unwrap()
    }

    #[test]
    fn test_simple_quote_found() {
        let arena = doc(&["the quick brown fox"]);
        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("quick"),
            &QuoteOptions::default(),
        )
        .unwrap();

        assert_eq!(found.range.text(&arena).unwrap(), "quick");
        assert_eq!(found.text_start, 4);
        assert_eq!(found.text_end, 9);
        assert_eq!(found.full_text, "quick");
    }

    #[test]
    fn test_quote_across_split_nodes() {
        // "hello " / "brave" / " world" in separate nodes
        let mut builder = DocumentBuilder::new();
        let r = builder.root("p");
        builder.text("hello ", r);
        let em = builder.element("em", r);
        builder.text("brave", em);
        builder.text(" world", r);
        let arena = builder.finish();

        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("lo brave wor"),
            &QuoteOptions::default(),
        )
        .unwrap();
        assert_eq!(found.range.text(&arena).unwrap(), "lo brave wor");
    }

    #[test]
    fn test_context_disambiguation() {
        let arena = doc(&["apple pie apple tart"]);
        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::with_context("apple", "", "tart"),
            &QuoteOptions::default(),
        )
        .unwrap();

        // The second apple, the one followed by "tart"
        assert_eq!(found.text_start, 10);
        assert_eq!(found.full_text, "apple tart");
    }

    #[test]
    fn test_ambiguity_policies() {
        let arena = doc(&["foo bar foo baz"]);
        let selector = TextQuoteSelector::new("foo");

        let all = find_all_text_quotes(&arena, root(&arena), &selector, &QuoteOptions::default());
        assert_eq!(all.len(), 2);

        // Default selection takes the first occurrence
        let first = find_text_quote(&arena, root(&arena), &selector, &QuoteOptions::default())
            .unwrap();
        assert_eq!(first.text_start, 0);

        let unique = find_text_quote(
            &arena,
            root(&arena),
            &selector,
            &QuoteOptions {
                require_unique: true,
                ..Default::default()
            },
        );
        assert!(unique.is_none());

        let second = find_text_quote(
            &arena,
            root(&arena),
            &selector,
            &QuoteOptions {
                match_index: 1,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(second.text_start, 8);
        assert_eq!(second.range.text(&arena).unwrap(), "foo");
    }

    #[test]
    fn test_match_index_out_of_bounds() {
        let arena = doc(&["foo bar"]);
        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("foo"),
            &QuoteOptions {
                match_index: 5,
                ..Default::default()
            },
        );
        assert!(found.is_none());
    }

    #[test]
    fn test_whitespace_fallback() {
        // Irregular spacing across node boundaries; the captured quote has
        // single spaces
        let mut builder = DocumentBuilder::new();
        let r = builder.root("p");
        builder.text("hello  ", r);
        let em = builder.element("em", r);
        builder.text(" world", em);
        let arena = builder.finish();

        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("hello world"),
            &QuoteOptions::default(),
        )
        .unwrap();

        // The range bounds the original irregular text
        assert_eq!(found.range.text(&arena).unwrap(), "hello   world");
        assert_eq!(found.text_start, 0);
        assert_eq!(found.text_end, 13);
    }

    #[test]
    fn test_find_all_with_fallback() {
        let arena = doc(&["a  b and a  b"]);
        let all = find_all_text_quotes(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("a b"),
            &QuoteOptions::default(),
        );
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].range.text(&arena).unwrap(), "a  b");
        assert_eq!(all[1].range.text(&arena).unwrap(), "a  b");
    }

    #[test]
    fn test_idempotent_on_unchanged_tree() {
        let arena = doc(&["some stable text here"]);
        let selector = TextQuoteSelector::with_context("stable", "some", "here");

        let first = find_text_quote(&arena, root(&arena), &selector, &QuoteOptions::default())
            .unwrap();
        let second = find_text_quote(&arena, root(&arena), &selector, &QuoteOptions::default())
            .unwrap();

        assert_eq!(first.text_start, second.text_start);
        assert_eq!(first.text_end, second.text_end);
        assert_eq!(first.range, second.range);
        assert_eq!(first.full_text, second.full_text);
    }

    #[test]
    fn test_empty_exact_returns_none() {
        let arena = doc(&["anything"]);
        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::new(""),
            &QuoteOptions::default(),
        );
        assert!(found.is_none());
    }

    #[test]
    fn test_container_without_text() {
        let mut builder = DocumentBuilder::new();
        let r = builder.root("div");
        builder.element("p", r);
        let arena = builder.finish();

        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("foo"),
            &QuoteOptions::default(),
        );
        assert!(found.is_none());
        assert!(find_all_text_quotes(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("foo"),
            &QuoteOptions::default()
        )
        .is_empty());
    }

    #[test]
    fn test_no_match_returns_none() {
        let arena = doc(&["nothing to see"]);
        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("absent"),
            &QuoteOptions::default(),
        );
        assert!(found.is_none());
    }

    #[test]
    fn test_container_scoping() {
        let arena = doc(&["target in first", "target in second"]);
        let paragraphs = arena.children(root(&arena)).unwrap();
        let second_p = paragraphs[1].node_id;

        let found = find_text_quote(
            &arena,
            second_p,
            &TextQuoteSelector::new("target"),
            &QuoteOptions {
                require_unique: true,
                ..Default::default()
            },
        )
        .unwrap();
        // Offsets are relative to the scoped container's flattened text
        assert_eq!(found.text_start, 0);
    }

    #[test]
    fn test_quote_at_end_of_text() {
        let arena = doc(&["ends with fox"]);
        let found = find_text_quote(
            &arena,
            root(&arena),
            &TextQuoteSelector::new("fox"),
            &QuoteOptions::default(),
        )
        .unwrap();
        assert_eq!(found.text_end, 13);
        assert_eq!(found.range.text(&arena).unwrap(), "fox");
    }
}
