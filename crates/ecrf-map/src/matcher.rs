//! Free functions over the ordered mapping list.

use ecrf_model::{ColumnMapping, SchemaField};

use crate::error::{MappingError, Result};
use crate::lookup::SchemaLookup;

/// Builds one mapping per header, resolving each through the lookup.
///
/// Output order matches `headers`. Unmatched headers map to `None`.
pub fn auto_match<S: AsRef<str>>(headers: &[S], lookup: &SchemaLookup) -> Vec<ColumnMapping> {
    let mappings: Vec<ColumnMapping> = headers
        .iter()
        .map(|header| {
            let header = header.as_ref();
            ColumnMapping::new(header, lookup.resolve(header).map(str::to_string))
        })
        .collect();

    tracing::debug!(
        columns = mappings.len(),
        matched = mappings.iter().filter(|m| m.is_mapped()).count(),
        "auto-matched columns"
    );
    mappings
}

/// Sets or clears the target of the first entry for `csv_column`.
pub fn set_mapping(
    mappings: &mut [ColumnMapping],
    csv_column: &str,
    field: Option<&str>,
) -> Result<()> {
    let entry = mappings
        .iter_mut()
        .find(|m| m.csv_column == csv_column)
        .ok_or_else(|| MappingError::ColumnNotFound(csv_column.to_string()))?;
    entry.schema_column = field.map(str::to_string);
    Ok(())
}

/// Required fields not targeted by any mapping, in schema order.
pub fn missing_required<'a>(
    mappings: &[ColumnMapping],
    schema: &'a [SchemaField],
) -> Vec<&'a str> {
    schema
        .iter()
        .filter(|field| field.required)
        .filter(|field| !mappings.iter().any(|m| m.targets(&field.name)))
        .map(|field| field.name.as_str())
        .collect()
}

/// True when every required field is targeted by at least one mapping.
pub fn is_complete(mappings: &[ColumnMapping], schema: &[SchemaField]) -> bool {
    missing_required(mappings, schema).is_empty()
}
