//! Text-quote anchoring for annotations
//!
//! Locates a quoted span of text, described as (prefix, exact, suffix),
//! inside a rendered-document tree whose text is split across arbitrarily
//! many text nodes, and turns the location into a [`dom::DomRange`] for
//! highlighting. Re-running a lookup after the tree is re-rendered
//! re-anchors the annotation against the new tree.
//!
//! ## Pipeline
//!
//! ```text
//! DomArena + container → flatten → match (exact, then ws-normalized) → range
//! ```
//!
//! Every stage is recomputed per call; the engine holds no state between
//! calls and never mutates the tree.
//!
//! ## Example
//!
//! ```
//! use anchor::{find_text_quote, QuoteOptions, TextQuoteSelector};
//! use dom::DocumentBuilder;
//!
//! let mut builder = DocumentBuilder::new();
//! let root = builder.root("p");
//! builder.text("the quick brown fox", root);
//! let arena = builder.finish();
//!
//! let selector = TextQuoteSelector::with_context("quick", "the", "brown");
//! let found = find_text_quote(&arena, root, &selector, &QuoteOptions::default()).unwrap();
//! assert_eq!(found.range.text(&arena).unwrap(), "quick");
//! ```

pub mod engine;
pub mod flatten;
pub mod matching;
pub mod normalize;
pub mod selector;

pub use engine::{find_all_text_quotes, find_text_quote, QuoteOptions, TextQuoteMatch};
pub use flatten::{
    build_text_from_positions, collect_text_nodes, offset_to_node_position, NodePosition,
    TextNodePosition,
};
pub use matching::{find_matches, MatchDescriptor};
pub use selector::TextQuoteSelector;
