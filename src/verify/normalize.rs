//! Text normalization for quote comparison
//!
//! Quotes come out of a generator and source text comes out of a PDF
//! extractor; the two disagree on case, line breaks, and punctuation
//! spacing. Both sides are reduced to one canonical form before any
//! substring matching happens.

/// Punctuation that gets padded with spaces so it tokenizes on its own.
pub const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '"'];

/// Produce the canonical comparable form of arbitrary text.
///
/// Rules:
/// - all alphabetic characters lowercased
/// - newlines and carriage returns become spaces
/// - each recognized punctuation mark gets exactly one space on each side
/// - runs of whitespace collapse to a single space
/// - no leading or trailing whitespace
///
/// Total over all input (empty in, empty out) and idempotent.
pub fn normalize(text: &str) -> String {
    let mut padded = String::with_capacity(text.len() + 16);

    for ch in text.chars() {
        if PUNCTUATION.contains(&ch) {
            padded.push(' ');
            padded.push(ch);
            padded.push(' ');
        } else if ch == '\n' || ch == '\r' {
            padded.push(' ');
        } else {
            for lower in ch.to_lowercase() {
                padded.push(lower);
            }
        }
    }

    // Collapse whitespace runs and trim in one pass
    padded.split_whitespace().collect::<Vec<_>>().join(" ")
}
