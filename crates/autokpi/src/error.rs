//! Error types for the AutoKPI library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for AutoKPI operations.
#[derive(Debug, Error)]
pub enum AutoKpiError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A column-oriented table was built from columns of unequal length.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The schema references a column the table does not have.
    #[error("Column not found: '{0}'")]
    ColumnNotFound(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for AutoKPI operations.
pub type Result<T> = std::result::Result<T, AutoKpiError>;
