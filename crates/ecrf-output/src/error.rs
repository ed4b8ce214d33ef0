//! Error types for export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing the export.
#[derive(Debug, Error)]
pub enum OutputError {
    /// There are no rows to export.
    #[error("no data to export")]
    NoData,

    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
