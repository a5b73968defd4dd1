//! Error types for the leadpipe library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for import operations.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not recognizable as a delimited lead export.
    /// Fatal; raised before any row is processed.
    #[error("Unrecognized file format: {0}")]
    FileFormat(String),

    /// One or more required canonical fields could not be resolved
    /// from the headers. Fatal; raised before any row is processed.
    #[error("Missing required columns: {}. Headers found: {}", missing.join(", "), headers.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        headers: Vec<String>,
    },

    /// A single create call to the lead store failed.
    #[error("Lead store error: {message}")]
    Store { message: String },

    /// A chunk commit failed; earlier chunks remain committed.
    #[error("Commit failed after {committed} lead(s) were committed: {message}")]
    Commit { committed: usize, message: String },

    /// A rejected-lead id was not found in the session.
    #[error("No rejected lead with id '{0}' in this session")]
    RejectionNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport error from the REST lead store.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
