//! Retrieved documents and their metadata
//!
//! PDF loaders attach ragged metadata: different documents in one set
//! carry different keys, keys contain spaces or punctuation, and the
//! creation date arrives in several formats. The helpers here make a
//! document set uniform enough to format and cite.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One retrieved passage with its loader metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Extracted page text
    pub content: String,
    /// Loader-provided metadata, ragged across documents
    #[serde(default)]
    pub metadata: serde_json::Map<String, Value>,
}

impl SourceDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Builder-style metadata insertion.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> &str {
        self.str_field("title").filter(|s| !s.is_empty()).unwrap_or("Untitled")
    }

    pub fn author(&self) -> &str {
        self.str_field("author").filter(|s| !s.is_empty()).unwrap_or("Unknown")
    }

    /// Zero-indexed page number as reported by the loader.
    pub fn page(&self) -> u64 {
        self.metadata.get("page").and_then(Value::as_u64).unwrap_or(0)
    }

    pub fn creation_date(&self) -> &str {
        self.str_field("creationdate").unwrap_or("")
    }

    /// Display year derived from the creation date.
    pub fn year(&self) -> String {
        extract_year(self.creation_date())
    }
}

/// Ensure every document carries every metadata key observed across the
/// set, filling gaps with an empty value of the matching JSON type.
///
/// Vector stores reject documents whose field sets differ, so a ragged
/// set has to be padded before insertion.
pub fn pad_metadata_fields(docs: &mut [SourceDocument]) {
    let mut fields: Vec<(String, Value)> = Vec::new();
    for doc in docs.iter() {
        for (key, value) in &doc.metadata {
            if !fields.iter().any(|(k, _)| k == key) {
                fields.push((key.clone(), empty_like(value)));
            }
        }
    }

    for doc in docs.iter_mut() {
        for (key, default) in &fields {
            if !doc.metadata.contains_key(key) {
                doc.metadata.insert(key.clone(), default.clone());
            }
        }
    }
}

/// Empty value of the same JSON type.
fn empty_like(value: &Value) -> Value {
    match value {
        Value::String(_) => Value::String(String::new()),
        Value::Number(_) => Value::from(0),
        Value::Bool(_) => Value::Bool(false),
        Value::Array(_) => Value::Array(Vec::new()),
        Value::Object(_) => Value::Object(serde_json::Map::new()),
        Value::Null => Value::Null,
    }
}

/// Rewrite metadata keys so they contain only ASCII alphanumerics and
/// underscores.
pub fn sanitize_metadata_fields(docs: &mut [SourceDocument]) {
    for doc in docs.iter_mut() {
        let keys: Vec<String> = doc.metadata.keys().cloned().collect();
        for key in keys {
            let clean = sanitize_field_name(&key);
            if clean != key {
                if let Some(value) = doc.metadata.remove(&key) {
                    doc.metadata.insert(clean, value);
                }
            }
        }
    }
}

/// Map every character outside `[A-Za-z0-9_]` to an underscore.
pub fn sanitize_field_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Pull a display year out of a loader creation date.
///
/// Accepts ISO-8601 datetimes and the PDF `D:YYYYMMDD...` form; anything
/// unrecognized yields `"n.d."` (no date).
pub fn extract_year(creation_date: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(creation_date) {
        return dt.year().to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(creation_date, "%Y-%m-%dT%H:%M:%S") {
        return dt.year().to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(creation_date, "%Y-%m-%d") {
        return date.year().to_string();
    }

    // PDF-style: D:20230919124054Z00'00'
    if let Some(rest) = creation_date.strip_prefix("D:") {
        let year: String = rest.chars().take(4).collect();
        if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
            return year;
        }
    }

    "n.d.".to_string()
}
