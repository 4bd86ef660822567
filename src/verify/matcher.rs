//! Checkpoint matching for claimed quotations
//!
//! A quotation is split into checkpoint segments at ellipses and
//! punctuation, then each segment is searched for in the normalized
//! source with a cursor that only moves forward. Segments must appear
//! in source order without overlap; reordered or fabricated content
//! fails the check.
//!
//! # Design Decisions
//!
//! - **Exact substring match only**: after normalization, a segment
//!   either appears literally or the quote is rejected. No fuzzy
//!   matching, so the result is always explainable.
//! - **Fail closed**: a single missing segment fails the whole quote.
//! - **Short segments are not evidence**: segments under the token
//!   threshold are skipped rather than matched, since single words
//!   produce too many false positives to mean anything.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normalize::normalize;

/// Punctuation that terminates a checkpoint segment.
const SEGMENT_BREAKS: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Matching policy knobs.
#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    /// Minimum whitespace-separated tokens for a segment to count as a
    /// checkpoint. Shorter segments are skipped.
    pub min_segment_tokens: usize,
    /// Treat a quote with zero qualifying checkpoints as unverified
    /// instead of trivially verified.
    pub require_checkpoint: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_segment_tokens: 2,
            require_checkpoint: false,
        }
    }
}

/// Overall outcome of checking one quote against one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every qualifying checkpoint matched in source order
    Verified,
    /// No segment met the token threshold, so nothing was actually checked
    Trivial,
    /// A qualifying checkpoint was not found at or after the cursor
    Unverified,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Verified => "verified",
            Verdict::Trivial => "trivial",
            Verdict::Unverified => "unverified",
        }
    }
}

/// What happened to a single checkpoint segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SegmentOutcome {
    /// Found at byte range [start, end) in the normalized source
    Matched { start: usize, end: usize },
    /// Below the token threshold, not used as evidence
    Skipped,
    /// Not found at or after the cursor position
    NotFound { cursor: usize },
}

/// One segment with its outcome, in quote order.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentCheck {
    /// The normalized segment text
    pub segment: String,
    #[serde(flatten)]
    pub outcome: SegmentOutcome,
}

/// Detailed result of a quote check.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteCheck {
    pub verdict: Verdict,
    /// Per-segment outcomes. Stops at the first failed segment.
    pub segments: Vec<SegmentCheck>,
}

impl QuoteCheck {
    /// Whether the quote passes. A trivial check passes under the
    /// default policy (see `MatcherConfig::require_checkpoint`).
    pub fn verified(&self) -> bool {
        self.verdict != Verdict::Unverified
    }
}

/// Split a normalized quotation into checkpoint segments.
///
/// Splits at ellipses first, then at single punctuation marks; each
/// segment is trimmed and empties are dropped. A quote with no
/// punctuation and no ellipsis yields exactly one segment.
pub fn split_checkpoints(quote: &str) -> Vec<String> {
    quote
        .split("...")
        .flat_map(|part| part.split(SEGMENT_BREAKS))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check a claimed quotation against a source text.
///
/// Both inputs are raw; normalization happens here. Returns the
/// per-segment detail along with the overall verdict.
pub fn check_quote(quote: &str, source: &str, config: &MatcherConfig) -> QuoteCheck {
    let normalized_source = normalize(source);
    let normalized_quote = normalize(quote);

    let mut segments = Vec::new();
    let mut cursor = 0usize;
    let mut qualifying = 0usize;
    let mut failed = false;

    for segment in split_checkpoints(&normalized_quote) {
        if segment.split_whitespace().count() < config.min_segment_tokens {
            debug!(segment = %segment, "segment below token threshold, skipped");
            segments.push(SegmentCheck {
                segment,
                outcome: SegmentOutcome::Skipped,
            });
            continue;
        }
        qualifying += 1;

        // Search only at or after the cursor to enforce source order
        match normalized_source[cursor..].find(segment.as_str()) {
            Some(relative) => {
                let start = cursor + relative;
                let end = start + segment.len();
                debug!(segment = %segment, start, end, "segment matched");
                cursor = end;
                segments.push(SegmentCheck {
                    segment,
                    outcome: SegmentOutcome::Matched { start, end },
                });
            }
            None => {
                debug!(segment = %segment, cursor, "segment not found after cursor");
                segments.push(SegmentCheck {
                    segment,
                    outcome: SegmentOutcome::NotFound { cursor },
                });
                failed = true;
                break;
            }
        }
    }

    let verdict = if failed {
        Verdict::Unverified
    } else if qualifying == 0 {
        if config.require_checkpoint {
            Verdict::Unverified
        } else {
            Verdict::Trivial
        }
    } else {
        Verdict::Verified
    };

    QuoteCheck { verdict, segments }
}

/// Boolean entry point with the default policy.
pub fn verify_quote(quote: &str, source: &str) -> bool {
    check_quote(quote, source, &MatcherConfig::default()).verified()
}
