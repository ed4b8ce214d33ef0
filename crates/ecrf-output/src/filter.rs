//! Row selection by validation outcome.

use ecrf_model::{Record, ValidationResult};

/// Keeps the rows whose 1-based index has no finding, in original order.
pub fn filter_valid_rows(rows: &[Record], result: &ValidationResult) -> Vec<Record> {
    let invalid = result.invalid_row_indices();
    rows.iter()
        .enumerate()
        .filter(|(idx, _)| !invalid.contains(&(idx + 1)))
        .map(|(_, row)| row.clone())
        .collect()
}
