//! Error types for the hierarchy engine
//!
//! Building, indexing and traversing a forest never fails. Errors only come
//! from acquiring a snapshot.

use orgchart_common::{ErrorSeverity, Severity};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for orgchart operations
pub type Result<T> = std::result::Result<T, OrgChartError>;

/// Errors that can occur while fetching a snapshot
#[derive(Debug, Error)]
pub enum OrgChartError {
    /// Snapshot file does not exist
    #[error("snapshot not found: {path}")]
    SnapshotNotFound { path: PathBuf },

    /// Upstream data source failed
    #[error("data source error: {0}")]
    Source(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OrgChartError {
    /// Wrap an upstream failure message
    pub fn source_error(message: impl Into<String>) -> Self {
        OrgChartError::Source(message.into())
    }
}

impl Severity for OrgChartError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OrgChartError::SnapshotNotFound { .. } => ErrorSeverity::Error,
            OrgChartError::Source(_) => ErrorSeverity::Error,
            OrgChartError::Io(_) => ErrorSeverity::Error,
            // A malformed payload means nothing can be displayed
            OrgChartError::Json(_) => ErrorSeverity::Critical,
        }
    }
}
