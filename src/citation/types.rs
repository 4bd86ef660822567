//! Structured answer and citation types
//!
//! These mirror the structured-output schema the answer generator is
//! asked to produce: an answer grounded only in the supplied sources,
//! with verbatim quotes tied to source IDs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A verbatim quote tied to one retrieved source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    /// Index of the source that justifies the answer
    pub source_id: usize,
    /// The verbatim quote from that source
    pub quote: String,
}

/// Structured answer produced by the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotedAnswer {
    /// Answer text, based only on the supplied sources
    pub answer: String,
    /// Quotes that justify the answer
    #[serde(default)]
    pub citations: Vec<Citation>,
    /// Human-readable source list (author + page)
    #[serde(default)]
    pub sources: Vec<String>,
}

impl QuotedAnswer {
    /// Parse a generator response from JSON.
    pub fn from_json(json: &str) -> Result<Self, AnswerError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Failures while resolving an answer against its documents.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// A citation points at a source index that was never retrieved
    #[error("citation {citation} references unknown source {source_id} ({available} sources available)")]
    UnknownSource {
        /// 1-indexed citation position
        citation: usize,
        source_id: usize,
        available: usize,
    },

    #[error("failed to parse answer JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_answer() {
        let json = r#"{
            "answer": "The fox jumps.",
            "citations": [{"source_id": 0, "quote": "the quick brown fox"}],
            "sources": ["Smith, p. 1"]
        }"#;
        let answer = QuotedAnswer::from_json(json).unwrap();
        assert_eq!(answer.citations.len(), 1);
        assert_eq!(answer.citations[0].source_id, 0);
    }

    #[test]
    fn test_citations_and_sources_default_empty() {
        let answer = QuotedAnswer::from_json(r#"{"answer": "No idea."}"#).unwrap();
        assert!(answer.citations.is_empty());
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn test_parse_error_is_typed() {
        let err = QuotedAnswer::from_json("not json").unwrap_err();
        assert!(matches!(err, AnswerError::Parse(_)));
    }
}
