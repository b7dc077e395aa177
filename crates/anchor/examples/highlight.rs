//! Anchoring example - load a snapshot, locate a quote, print the range

use anchor::{find_all_text_quotes, find_text_quote, QuoteOptions, TextQuoteSelector};
use dom::DocumentBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // A rendered document snapshot, the shape a host hands over
    let snapshot = serde_json::json!({
        "nodeType": 1,
        "nodeName": "article",
        "attributes": {"id": "content"},
        "children": [
            {"nodeType": 1, "nodeName": "p", "children": [
                {"nodeType": 3, "nodeValue": "The quick brown "},
                {"nodeType": 1, "nodeName": "em", "children": [
                    {"nodeType": 3, "nodeValue": "fox"}
                ]},
                {"nodeType": 3, "nodeValue": " jumps over the lazy dog."}
            ]},
            {"nodeType": 1, "nodeName": "p", "children": [
                {"nodeType": 3, "nodeValue": "The fox returns."}
            ]}
        ]
    });

    let arena = DocumentBuilder::from_snapshot(&snapshot)?;
    let container = arena.root_id().expect("snapshot has a root");

    // A quote captured when the annotation was created
    let selector = TextQuoteSelector::with_context("fox", "quick brown", "jumps");

    match find_text_quote(&arena, container, &selector, &QuoteOptions::default()) {
        Some(found) => {
            println!("anchored \"{}\" at {}..{}", found.full_text, found.text_start, found.text_end);
            println!(
                "range: node {} offset {} → node {} offset {}",
                found.range.start_node(),
                found.range.start_offset(),
                found.range.end_node(),
                found.range.end_offset()
            );
            println!("spanned text: {:?}", found.range.text(&arena)?);
        }
        None => println!("could not anchor the quote"),
    }

    // Without context the quote is ambiguous; find-all shows every occurrence
    let every = find_all_text_quotes(
        &arena,
        container,
        &TextQuoteSelector::new("fox"),
        &QuoteOptions::default(),
    );
    println!("\"fox\" occurs {} times", every.len());

    Ok(())
}
