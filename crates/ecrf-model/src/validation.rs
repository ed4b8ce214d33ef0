//! Validation error and result types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single per-cell validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based data row number.
    pub row_index: usize,
    /// Schema field name.
    pub field: String,
    /// Offending raw value, `None` when the field is not mapped at all.
    pub value: Option<String>,
    pub message: String,
    pub severity: Severity,
}

impl ValidationError {
    pub fn error(
        row_index: usize,
        field: impl Into<String>,
        value: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            field: field.into(),
            value,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Outcome of validating a mapped table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub total_rows: usize,
    pub valid_rows: usize,
    /// Number of distinct row indices present in `errors`.
    pub invalid_rows: usize,
}

impl ValidationResult {
    /// Builds the aggregate counts from a list of findings.
    pub fn from_errors(total_rows: usize, errors: Vec<ValidationError>) -> Self {
        let invalid_rows = errors
            .iter()
            .map(|e| e.row_index)
            .collect::<BTreeSet<_>>()
            .len();
        Self {
            is_valid: errors.is_empty(),
            total_rows,
            valid_rows: total_rows.saturating_sub(invalid_rows),
            invalid_rows,
            errors,
        }
    }

    /// 1-based indices of rows with at least one finding.
    pub fn invalid_row_indices(&self) -> BTreeSet<usize> {
        self.errors.iter().map(|e| e.row_index).collect()
    }

    pub fn error_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .count()
    }
}
