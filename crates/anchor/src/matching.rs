//! Quote matching over the flattened text
//!
//! Scans for every occurrence of the exact text, keeps the ones whose
//! context constraints hold, and widens each accepted span to the matched
//! context. Exact mode works on the raw flattened string; normalized mode
//! runs the identical scan on whitespace-collapsed strings and maps the
//! offsets back.

use crate::normalize::{collapse_only, collapse_whitespace};
use crate::selector::TextQuoteSelector;
use memchr::memmem;

/// An accepted occurrence of the quote
///
/// All offsets index the flattened string, with
/// `full_start <= exact_start <= exact_end <= full_end`. The exact span
/// bounds the located quote; the full span extends to the start of the
/// matched prefix occurrence and the end of the matched suffix occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchDescriptor {
    pub full_start: usize,
    pub full_end: usize,
    pub exact_start: usize,
    pub exact_end: usize,
}

/// Find every context-satisfying occurrence of the selector's quote
///
/// The selector is sanitized first (self-overlapping context trimmed).
/// Context does not have to be adjacent to the quote, but it binds to the
/// nearest occurrence: a prefix must appear after the previous occurrence of
/// the exact text, a suffix before the next one. That is what lets context
/// single out one occurrence among duplicates instead of matching them all.
///
/// Matches come back in left-to-right order with no early exit, so the same
/// routine serves single-match selection and find-all. Empty `exact` yields
/// no matches.
pub fn find_matches(
    text: &str,
    selector: &TextQuoteSelector,
    normalize_ws: bool,
) -> Vec<MatchDescriptor> {
    let selector = selector.sanitized();
    if selector.exact.is_empty() {
        return Vec::new();
    }

    if !normalize_ws {
        return scan(text, &selector);
    }

    let (collapsed, map) = collapse_whitespace(text);
    let collapsed_selector = TextQuoteSelector {
        exact: collapse_only(&selector.exact),
        prefix: collapse_only(&selector.prefix),
        suffix: collapse_only(&selector.suffix),
    };

    scan(&collapsed, &collapsed_selector)
        .into_iter()
        .map(|m| MatchDescriptor {
            full_start: map[m.full_start],
            full_end: map[m.full_end],
            exact_start: map[m.exact_start],
            exact_end: map[m.exact_end],
        })
        .collect()
}

/// The shared occurrence scan
fn scan(text: &str, selector: &TextQuoteSelector) -> Vec<MatchDescriptor> {
    let hay = text.as_bytes();
    let exact = selector.exact.as_bytes();

    // Candidate occurrences first. The search resumes one byte past each
    // found position so overlapping occurrences are all considered; UTF-8
    // needles cannot match starting on a continuation byte, so every hit
    // lies on a char boundary.
    let finder = memmem::Finder::new(exact);
    let mut candidates = Vec::new();
    let mut from = 0usize;
    while let Some(found) = finder.find(&hay[from..]) {
        candidates.push(from + found);
        from = from + found + 1;
    }

    let mut matches = Vec::new();
    for (idx, &exact_start) in candidates.iter().enumerate() {
        let exact_end = exact_start + exact.len();

        // Context before: the prefix occurrence must lie entirely between
        // the previous candidate occurrence and this one. Last occurrence
        // wins (nearest the quote).
        let full_start = if selector.prefix.is_empty() {
            exact_start
        } else if exact_start == 0 {
            continue;
        } else {
            let window_start = match idx {
                0 => 0,
                _ => (candidates[idx - 1] + exact.len()).min(exact_start),
            };
            match memmem::rfind(
                &hay[window_start..exact_start],
                selector.prefix.as_bytes(),
            ) {
                Some(at) => window_start + at,
                None => continue,
            }
        };

        // Context after: the suffix occurrence must lie entirely between
        // this candidate occurrence and the next. First occurrence wins.
        let full_end = if selector.suffix.is_empty() {
            exact_end
        } else if exact_end == hay.len() {
            continue;
        } else {
            let window_end = match candidates.get(idx + 1) {
                Some(&next) => next.max(exact_end),
                None => hay.len(),
            };
            match memmem::find(&hay[exact_end..window_end], selector.suffix.as_bytes()) {
                Some(at) => exact_end + at + selector.suffix.len(),
                None => continue,
            }
        };

        matches.push(MatchDescriptor {
            full_start,
            full_end,
            exact_start,
            exact_end,
        });
    }

    matches
}
