//! Source context assembly
//!
//! The generator is shown one block per retrieved document, keyed by a
//! numeric source ID; citations refer back to those IDs. The same string
//! is what citation quotes are verified against.

use super::metadata::SourceDocument;

/// Render the retrieval context, one block per document.
///
/// Block `i` corresponds to `Citation::source_id == i`. Page numbers are
/// displayed 1-indexed.
pub fn format_sources(docs: &[SourceDocument]) -> String {
    let blocks: Vec<String> = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            format!(
                "Source ID: {}\nArticle Title: {}\nAuthor: {}\nPage Number: {}\nYear: {}\nArticle Snippet: {}",
                i,
                doc.title(),
                doc.author(),
                doc.page() + 1,
                doc.year(),
                doc.content
            )
        })
        .collect();

    format!("\n\n{}", blocks.join("\n\n"))
}
