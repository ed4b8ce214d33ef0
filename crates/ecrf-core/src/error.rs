//! Session error types.
//!
//! Every failure crossing the session boundary is a [`SessionError`]. The
//! session stays usable after any of them.

use thiserror::Error;

use ecrf_ingest::IngestError;
use ecrf_map::MappingError;
use ecrf_output::OutputError;
use ecrf_standards::StandardsError;

/// Session operation error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Standards(#[from] StandardsError),

    #[error(transparent)]
    Output(#[from] OutputError),

    /// Required fields are not targeted by any column.
    #[error("required fields are not mapped: {}", missing.join(", "))]
    IncompleteMapping { missing: Vec<String> },

    /// The operation needs a loaded file.
    #[error("no file loaded")]
    NoFileLoaded,

    /// Sheet operations need an Excel source.
    #[error("the loaded file is not a workbook")]
    NotAWorkbook,

    /// Export refused because validation found errors.
    #[error("export blocked: {invalid_rows} row(s) failed validation")]
    ExportBlocked { invalid_rows: usize },
}

impl SessionError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Ingest(err) => match err {
                IngestError::EmptyFile => "The file is empty.".to_string(),
                IngestError::EmptyWorkbook => "The workbook contains no sheets.".to_string(),
                IngestError::MissingSheet { name } => {
                    format!("The workbook has no sheet named '{name}'.")
                }
                IngestError::UnsupportedFormat { path } => format!(
                    "'{}' is not a supported file. Select a .csv, .xlsx or .xls file.",
                    path.file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("unknown")
                ),
                IngestError::FileRead { path, .. } => {
                    format!("Could not read the file at {}.", path.display())
                }
                IngestError::Workbook { .. } => {
                    "The workbook could not be read. The file may be corrupted.".to_string()
                }
                IngestError::LoadTask { .. } => {
                    "An error occurred while loading the file.".to_string()
                }
            },
            Self::Mapping(err) => err.to_string(),
            Self::Standards(err) => err.to_string(),
            Self::Output(OutputError::NoData) => "There is no data to export.".to_string(),
            Self::Output(err) => err.to_string(),
            Self::IncompleteMapping { missing } => format!(
                "All required fields must be mapped. Missing: {}.",
                missing.join(", ")
            ),
            Self::NoFileLoaded => "Load a file first.".to_string(),
            Self::NotAWorkbook => "Sheet selection is only available for Excel files.".to_string(),
            Self::ExportBlocked { invalid_rows } => format!(
                "Export blocked: {invalid_rows} row(s) have validation errors."
            ),
        }
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn incomplete_mapping_lists_fields() {
        let err = SessionError::IncompleteMapping {
            missing: vec!["Subject".to_string(), "Country".to_string()],
        };
        assert_eq!(err.to_string(), "required fields are not mapped: Subject, Country");
        assert_eq!(
            err.user_message(),
            "All required fields must be mapped. Missing: Subject, Country."
        );
    }

    #[test]
    fn ingest_messages_name_the_file() {
        let err = SessionError::from(IngestError::UnsupportedFormat {
            path: PathBuf::from("/tmp/report.pdf"),
        });
        assert!(err.user_message().contains("report.pdf"));
    }
}
