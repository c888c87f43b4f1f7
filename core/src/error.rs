//! Error types for report generation.
//!
//! Per-file read and parse failures are not errors at this level; they are
//! captured inside [`Extracted::Degraded`](crate::Extracted::Degraded). This
//! type covers the failures that abort a run: unreadable scan roots,
//! unwritable artifacts and malformed configuration.

use thiserror::Error;

/// Errors that can occur while scanning or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Invalid or missing input (e.g. a scan root that is not a directory).
    #[error("{0}")]
    InvalidInput(String),
}

/// Convenience alias for results with [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;
