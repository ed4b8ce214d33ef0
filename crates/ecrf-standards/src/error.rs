//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or querying the schema catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog document is not valid TOML or has the wrong shape.
    #[error("failed to parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// Catalog defines no studies.
    #[error("catalog {origin} defines no studies")]
    EmptyCatalog { origin: String },

    /// Two studies share an identifier.
    #[error("study '{id}' is defined more than once")]
    DuplicateStudy { id: String },

    /// Two fields of one study share a name.
    #[error("study '{study}' defines field '{field}' more than once")]
    DuplicateField { study: String, field: String },

    /// Requested study is not in the catalog.
    #[error("unknown study: {id}")]
    UnknownStudy { id: String },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, StandardsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StandardsError::UnknownStudy {
            id: "ABC-001".to_string(),
        };
        assert_eq!(err.to_string(), "unknown study: ABC-001");
    }
}
