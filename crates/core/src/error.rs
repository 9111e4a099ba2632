//! Error types for tablecheck.

use thiserror::Error;

/// Result type for tablecheck operations.
pub type TableCheckResult<T> = Result<T, TableCheckError>;

/// Errors that can occur while fetching or analysing a document.
#[derive(Debug, Error)]
pub enum TableCheckError {
    /// A category expected in the document is not present at all.
    #[error("Document {document_id} has no category '{category}'")]
    MissingCategory {
        category: String,
        document_id: String,
    },

    /// The document format cannot be analysed (XBRL).
    #[error("Document {0} is in XBRL format, which is not supported")]
    UnsupportedFormat(String),

    /// Reports were requested before any document was checked.
    #[error("No document has been checked yet")]
    NotChecked,

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report construction error.
    #[error("Report error: {0}")]
    Report(String),
}

impl TableCheckError {
    /// Create a missing-category error.
    pub fn missing_category(category: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self::MissingCategory {
            category: category.into(),
            document_id: document_id.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this is a lookup failure (a category key that does not exist).
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::MissingCategory { .. })
    }
}
