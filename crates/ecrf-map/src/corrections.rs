//! Value corrections for mapped columns.

use ecrf_model::{ColumnMapping, Record};
use ecrf_standards::ValueCorrections;

/// Returns a copy of `rows` with dictionary corrections applied.
///
/// A cell is replaced only when its column is mapped to a field that has
/// corrections and the cell equals one of that field's original values
/// exactly. Unmapped columns and unlisted values are copied unchanged.
pub fn apply_value_corrections(
    rows: &[Record],
    mappings: &[ColumnMapping],
    corrections: &ValueCorrections,
) -> Vec<Record> {
    let targets: Vec<(&str, &str)> = mappings
        .iter()
        .filter_map(|m| {
            let field = m.schema_column.as_deref()?;
            corrections
                .has_field(field)
                .then_some((m.csv_column.as_str(), field))
        })
        .collect();

    if targets.is_empty() {
        return rows.to_vec();
    }

    let mut replaced = 0usize;
    let corrected = rows
        .iter()
        .map(|row| {
            let mut row = row.clone();
            for (column, field) in &targets {
                let replacement = row
                    .get(column)
                    .and_then(|value| corrections.correct(field, value))
                    .map(str::to_string);
                if let Some(value) = replacement {
                    row.insert(*column, value);
                    replaced += 1;
                }
            }
            row
        })
        .collect();

    tracing::debug!(
        columns = targets.len(),
        replaced,
        "applied value corrections"
    );
    corrected
}
