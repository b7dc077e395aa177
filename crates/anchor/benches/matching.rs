//! Quote matching benchmark over a synthetic many-node document

use anchor::{find_text_quote, QuoteOptions, TextQuoteSelector};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dom::{DocumentBuilder, DomArena, NodeId};

/// Build a document of `paragraphs` paragraphs, each split into several
/// inline text nodes, with one known quote buried near the end
fn build_document(paragraphs: usize) -> (DomArena, NodeId) {
    let mut builder = DocumentBuilder::new();
    let root = builder.root("article");

    for i in 0..paragraphs {
        let p = builder.element("p", root);
        builder.text("Lorem ipsum dolor sit amet, consectetur ", p);
        let em = builder.element("em", p);
        builder.text("adipiscing elit", em);
        builder.text(&format!(", sed do eiusmod tempor {}  incididunt. ", i), p);
    }

    let last = builder.element("p", root);
    builder.text("the quick brown fox jumps over the lazy dog", last);

    (builder.finish(), root)
}

fn bench_find_quote(c: &mut Criterion) {
    let (arena, root) = build_document(200);
    let selector = TextQuoteSelector::with_context("fox", "quick brown", "jumps");
    let options = QuoteOptions::default();

    c.bench_function("find_quote_exact_200p", |b| {
        b.iter(|| {
            black_box(find_text_quote(
                black_box(&arena),
                root,
                &selector,
                &options,
            ))
        })
    });

    // A single-space quote against multi-space text forces the normalized
    // fallback path
    let ws_selector = TextQuoteSelector::new("tempor 42 incididunt");
    c.bench_function("find_quote_normalized_200p", |b| {
        b.iter(|| {
            black_box(find_text_quote(
                black_box(&arena),
                root,
                &ws_selector,
                &options,
            ))
        })
    });
}

criterion_group!(benches, bench_find_quote);
criterion_main!(benches);
