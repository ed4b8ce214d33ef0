//! Error types for tabular ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or parsing input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not one of the supported input formats.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Content Errors ===
    /// Input has no non-blank lines, or the selected sheet has no rows.
    #[error("the file is empty")]
    EmptyFile,

    /// Workbook contains no sheets.
    #[error("the workbook contains no sheets")]
    EmptyWorkbook,

    /// Requested sheet is not present in the workbook.
    #[error("sheet '{name}' not found in workbook")]
    MissingSheet { name: String },

    /// The workbook could not be decoded.
    #[error("failed to read workbook: {message}")]
    Workbook { message: String },

    // === Runtime Errors ===
    /// The blocking load task panicked or was cancelled.
    #[error("file loading task failed: {message}")]
    LoadTask { message: String },
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
