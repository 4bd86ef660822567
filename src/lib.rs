//! citecheck - citation-integrity checking for document QA answers
//!
//! A document question-answering pipeline retrieves passages and asks a
//! generator for an answer grounded in verbatim quotes. The generator is
//! not trustworthy: it fabricates quotes, reorders them, and mislabels
//! sources. This crate verifies that each claimed quote actually appears,
//! in order, in the retrieved source text before the answer is shown.
//!
//! # Architecture
//!
//! The check is deliberately simple and explainable:
//! - Both quote and source are normalized (case, whitespace, punctuation
//!   spacing) so formatting noise never fails a genuine quote
//! - The quote is split into checkpoint segments at ellipses and
//!   punctuation, so elided gaps are tolerated
//! - Each segment must appear in the source at or after the previous
//!   match, enforced by a forward-only cursor
//!
//! # Modules
//!
//! - `verify`: normalization, segmentation, and the cursor matcher
//! - `citation`: structured answer types and per-citation reports
//! - `source`: retrieved documents, metadata hygiene, context formatting
//! - `config`: matching policy from file and environment
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Verify one quote against a source text
//! citecheck check "the quick brown ... lazy dog" --source passages.txt
//!
//! # Verify every citation in a structured answer
//! citecheck report --answer answer.json --docs docs.json
//! ```

pub mod citation;
pub mod cli;
pub mod config;
pub mod source;
pub mod verify;

// Re-export main types at crate root for convenience
pub use citation::{check_answer, AnswerError, AnswerReport, Citation, CitationCheck, QuotedAnswer};
pub use source::{extract_year, format_sources, SourceDocument};
pub use verify::{check_quote, normalize, verify_quote, MatcherConfig, QuoteCheck, Verdict};
