//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Column not present in the loaded table.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Field not present in the active schema.
    #[error("schema field not found: {0}")]
    FieldNotFound(String),

    /// A field with this name already exists in the active schema.
    #[error("schema field already exists: {0}")]
    DuplicateField(String),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            MappingError::ColumnNotFound("Scan Dt".to_string()).to_string(),
            "column not found: Scan Dt"
        );
        assert_eq!(
            MappingError::DuplicateField("Visit".to_string()).to_string(),
            "schema field already exists: Visit"
        );
    }
}
