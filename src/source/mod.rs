//! Retrieved source documents
//!
//! Document content plus the metadata needed to cite it (author, title,
//! page, year), metadata hygiene for ragged loader output, and the
//! context formatting that citation source IDs refer to.

pub mod format;
pub mod metadata;

pub use format::format_sources;
pub use metadata::{
    extract_year, pad_metadata_fields, sanitize_field_name, sanitize_metadata_fields,
    SourceDocument,
};
