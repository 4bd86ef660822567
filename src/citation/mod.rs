//! Citations and answer-level verification
//!
//! The generator's structured answer (answer text plus verbatim quotes
//! tied to source IDs), and the report that verifies each quote against
//! the retrieval context before the answer is shown to anyone.

pub mod report;
pub mod types;

pub use report::{check_answer, quote_sha256, AnswerReport, CitationCheck, SourceRef};
pub use types::{AnswerError, Citation, QuotedAnswer};
