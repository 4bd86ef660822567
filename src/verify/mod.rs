//! Quote verification against retrieved source text
//!
//! Decides whether a quotation claimed by the answer generator is
//! genuinely present in the source passages, tolerating formatting
//! noise but rejecting fabricated or reordered content.
//!
//! # Design Principles
//!
//! - **Normalize, then match**: both sides are canonicalized (case,
//!   whitespace, punctuation spacing) so substring search is viable.
//! - **In-order checkpoints**: the quote is split into segments that
//!   must appear in source order, enforced by a forward-only cursor.
//! - **Fail closed**: a missing segment rejects the whole quote; a
//!   paraphrased quote is rejected rather than fuzzily accepted.
//!
//! # Example
//!
//! ```
//! use citecheck::verify::verify_quote;
//!
//! let source = "The quick brown fox jumps over the lazy dog.";
//! assert!(verify_quote("the quick brown ... lazy dog", source));
//! assert!(!verify_quote("the slow brown fox", source));
//! ```

pub mod matcher;
pub mod normalize;

pub use matcher::{
    check_quote, split_checkpoints, verify_quote, MatcherConfig, QuoteCheck, SegmentCheck,
    SegmentOutcome, Verdict,
};
pub use normalize::normalize;
