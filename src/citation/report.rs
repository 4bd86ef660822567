//! Per-citation verification of a structured answer
//!
//! Each citation's quote is checked against the formatted source
//! context; the report records a verdict and a quote digest per
//! citation, and renders the answer with unverified citations dropped.
//!
//! Retrieved documents are always passed in explicitly. There is no
//! process-wide "last retrieved" state, so concurrent question-answer
//! cycles cannot contaminate each other.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::citation::types::{AnswerError, QuotedAnswer};
use crate::source::{format_sources, SourceDocument};
use crate::verify::{check_quote, MatcherConfig, Verdict};

/// SHA256 digest of a quote, hex with a `sha256:` prefix.
pub fn quote_sha256(quote: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(quote.as_bytes());
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Rendered source reference for a citation.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    pub author: String,
    pub year: String,
    /// 1-indexed page number for display
    pub page: u64,
}

impl SourceRef {
    pub fn from_document(doc: &SourceDocument) -> Self {
        Self {
            author: doc.author().to_string(),
            year: doc.year(),
            page: doc.page() + 1,
        }
    }

    /// Academic citation form: `(Author, Year, p. Page)`.
    pub fn render(&self) -> String {
        format!("({}, {}, p. {})", self.author, self.year, self.page)
    }
}

/// One citation's verification result.
#[derive(Debug, Clone, Serialize)]
pub struct CitationCheck {
    /// 1-indexed position in the answer's citation list
    pub index: usize,
    pub quote: String,
    pub quote_sha256: String,
    pub verdict: Verdict,
    pub reference: SourceRef,
}

/// Verification results for a whole answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReport {
    pub answer: String,
    pub checks: Vec<CitationCheck>,
    pub verified_count: usize,
    pub trivial_count: usize,
    pub unverified_count: usize,
}

impl AnswerReport {
    /// Whether every citation passed (trivial checks count as passing).
    pub fn all_verified(&self) -> bool {
        self.unverified_count == 0
    }

    /// Render the answer with numbered citations, dropping any citation
    /// whose quote did not verify. An answer left with no citations
    /// renders as the bare answer text.
    pub fn render(&self) -> String {
        let kept: Vec<&CitationCheck> = self
            .checks
            .iter()
            .filter(|check| check.verdict != Verdict::Unverified)
            .collect();

        if kept.is_empty() {
            return format!("**Answer:** {}", self.answer);
        }

        let mut citations = String::new();
        for (n, check) in kept.iter().enumerate() {
            citations.push_str(&format!(
                "Quote {}: \"{}\" {}\n\n",
                n + 1,
                check.quote,
                check.reference.render()
            ));
        }

        format!("**Answer:** {}\n\n**Citations:**\n{}", self.answer, citations)
    }
}

/// Verify every citation in an answer against the supplied documents.
///
/// Quotes are checked against the full formatted context (the same
/// string the generator saw), not just the cited document, so a correct
/// quote attributed to a neighboring source still verifies. The
/// reference is taken from the cited document; a `source_id` outside
/// the document set is an error.
pub fn check_answer(
    answer: &QuotedAnswer,
    documents: &[SourceDocument],
    config: &MatcherConfig,
) -> Result<AnswerReport, AnswerError> {
    let source_text = format_sources(documents);

    let mut checks = Vec::with_capacity(answer.citations.len());
    let mut verified_count = 0;
    let mut trivial_count = 0;
    let mut unverified_count = 0;

    for (idx, citation) in answer.citations.iter().enumerate() {
        let doc = documents
            .get(citation.source_id)
            .ok_or(AnswerError::UnknownSource {
                citation: idx + 1,
                source_id: citation.source_id,
                available: documents.len(),
            })?;

        let check = check_quote(&citation.quote, &source_text, config);
        debug!(
            citation = idx + 1,
            verdict = check.verdict.as_str(),
            "checked citation quote"
        );

        match check.verdict {
            Verdict::Verified => verified_count += 1,
            Verdict::Trivial => trivial_count += 1,
            Verdict::Unverified => unverified_count += 1,
        }

        checks.push(CitationCheck {
            index: idx + 1,
            quote: citation.quote.clone(),
            quote_sha256: quote_sha256(&citation.quote),
            verdict: check.verdict,
            reference: SourceRef::from_document(doc),
        });
    }

    Ok(AnswerReport {
        answer: answer.answer.clone(),
        checks,
        verified_count,
        trivial_count,
        unverified_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::types::Citation;

    fn fixture_docs() -> Vec<SourceDocument> {
        vec![
            SourceDocument::new("The quick brown fox jumps over the lazy dog.")
                .with_field("author", "Aesop")
                .with_field("creationdate", "D:20101112000000")
                .with_field("page", 0),
            SourceDocument::new("Slow and steady wins the race, every time.")
                .with_field("author", "Hare")
                .with_field("creationdate", "2018-06-01T00:00:00")
                .with_field("page", 7),
        ]
    }

    fn answer_with(citations: Vec<Citation>) -> QuotedAnswer {
        QuotedAnswer {
            answer: "Both fables agree.".to_string(),
            citations,
            sources: vec![],
        }
    }

    #[test]
    fn test_verified_citation() {
        let answer = answer_with(vec![Citation {
            source_id: 0,
            quote: "quick brown fox".to_string(),
        }]);
        let report = check_answer(&answer, &fixture_docs(), &MatcherConfig::default()).unwrap();

        assert_eq!(report.verified_count, 1);
        assert!(report.all_verified());
        assert_eq!(report.checks[0].reference.author, "Aesop");
        assert_eq!(report.checks[0].reference.year, "2010");
        assert_eq!(report.checks[0].reference.page, 1);
        assert!(report.checks[0].quote_sha256.starts_with("sha256:"));
    }

    #[test]
    fn test_fabricated_citation_is_unverified_and_dropped_from_render() {
        let answer = answer_with(vec![
            Citation {
                source_id: 0,
                quote: "quick brown fox".to_string(),
            },
            Citation {
                source_id: 1,
                quote: "fast and reckless loses the race".to_string(),
            },
        ]);
        let report = check_answer(&answer, &fixture_docs(), &MatcherConfig::default()).unwrap();

        assert_eq!(report.verified_count, 1);
        assert_eq!(report.unverified_count, 1);
        assert!(!report.all_verified());

        let rendered = report.render();
        assert!(rendered.contains("Quote 1: \"quick brown fox\" (Aesop, 2010, p. 1)"));
        assert!(!rendered.contains("reckless"));
        // Kept citations are renumbered after the drop
        assert!(!rendered.contains("Quote 2:"));
    }

    #[test]
    fn test_unknown_source_id_is_an_error() {
        let answer = answer_with(vec![Citation {
            source_id: 9,
            quote: "quick brown fox".to_string(),
        }]);
        let err = check_answer(&answer, &fixture_docs(), &MatcherConfig::default()).unwrap_err();
        match err {
            AnswerError::UnknownSource {
                citation,
                source_id,
                available,
            } => {
                assert_eq!(citation, 1);
                assert_eq!(source_id, 9);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_answer_without_citations_renders_bare() {
        let answer = answer_with(vec![]);
        let report = check_answer(&answer, &fixture_docs(), &MatcherConfig::default()).unwrap();
        assert_eq!(report.render(), "**Answer:** Both fables agree.");
    }

    #[test]
    fn test_quote_sha256_format() {
        let digest = quote_sha256("hello");
        assert!(digest.starts_with("sha256:"));
        assert_eq!(digest.len(), 7 + 64);
    }
}
