//! Mapped CSV rendering.

use ecrf_model::{ColumnMapping, Record};

use crate::error::{OutputError, Result};

/// Output field separator. Independent of the import delimiter.
pub const SEPARATOR: char = ',';

/// Output columns: the target field of every mapped entry, in mapping order.
pub fn export_headers(mappings: &[ColumnMapping]) -> Vec<&str> {
    mappings
        .iter()
        .filter_map(|m| m.schema_column.as_deref())
        .collect()
}

/// Re-keys one input row by schema field name.
///
/// Entries are applied in mapping order, so when two columns target the same
/// field the later column's value wins. A column missing from the row
/// contributes an empty string.
pub fn project_row(row: &Record, mappings: &[ColumnMapping]) -> Record {
    let mut projected = Record::new();
    for mapping in mappings {
        if let Some(field) = mapping.schema_column.as_deref() {
            projected.insert(field, row.get(&mapping.csv_column).unwrap_or(""));
        }
    }
    projected
}

pub fn project_rows(rows: &[Record], mappings: &[ColumnMapping]) -> Vec<Record> {
    rows.iter().map(|row| project_row(row, mappings)).collect()
}

/// Quotes a value when it contains a separator, a quote or a line break.
pub fn escape_value(value: &str) -> String {
    if value.contains([SEPARATOR, '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders `rows` as CSV under `mappings`.
///
/// The first line holds the mapped field names. Every line, the last one
/// included, ends with `\n`.
pub fn serialize(rows: &[Record], mappings: &[ColumnMapping]) -> Result<String> {
    if rows.is_empty() {
        return Err(OutputError::NoData);
    }

    let headers = export_headers(mappings);
    let separator = SEPARATOR.to_string();

    let mut out = headers.join(&separator);
    out.push('\n');

    for row in rows {
        let projected = project_row(row, mappings);
        let line = headers
            .iter()
            .map(|field| escape_value(projected.get(field).unwrap_or("")))
            .collect::<Vec<_>>()
            .join(&separator);
        out.push_str(&line);
        out.push('\n');
    }

    tracing::debug!(
        columns = headers.len(),
        rows = rows.len(),
        bytes = out.len(),
        "serialized mapped rows"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(column: &str, field: &str) -> ColumnMapping {
        ColumnMapping::new(column, Some(field.to_string()))
    }

    #[test]
    fn escapes_only_when_needed() {
        assert_eq!(escape_value("plain"), "plain");
        assert_eq!(escape_value("a,b"), "\"a,b\"");
        assert_eq!(escape_value("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_value("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape_value("cr\r"), "\"cr\r\"");
        assert_eq!(escape_value(""), "");
    }

    #[test]
    fn empty_rows_are_no_data() {
        let err = serialize(&[], &[mapped("A", "A")]).unwrap_err();
        assert!(matches!(err, OutputError::NoData));
    }

    #[test]
    fn unmapped_columns_are_omitted() {
        let rows = vec![Record::from_pairs(&["subj", "note"], &["001", "skip me"])];
        let mappings = vec![mapped("subj", "Subject"), ColumnMapping::unmapped("note")];
        assert_eq!(serialize(&rows, &mappings).expect("serialize"), "Subject\n001\n");
    }

    #[test]
    fn duplicate_targets_resolve_last_write_wins() {
        let rows = vec![Record::from_pairs(&["v1", "v2"], &["first", "second"])];
        let mappings = vec![mapped("v1", "Visit"), mapped("v2", "Visit")];
        assert_eq!(
            serialize(&rows, &mappings).expect("serialize"),
            "Visit,Visit\nsecond,second\n"
        );
    }

    #[test]
    fn missing_source_column_is_empty() {
        let rows = vec![Record::from_pairs(&["a"], &["1"])];
        let mappings = vec![mapped("a", "A"), mapped("gone", "B")];
        assert_eq!(serialize(&rows, &mappings).expect("serialize"), "A,B\n1,\n");
    }

    #[test]
    fn projection_uses_field_names() {
        let row = Record::from_pairs(&["SUBJ", "VIS"], &["001", "V1"]);
        let projected = project_row(&row, &[mapped("SUBJ", "Subject"), mapped("VIS", "Visit")]);
        assert_eq!(projected.get("Subject"), Some("001"));
        assert_eq!(projected.get("SUBJ"), None);
    }
}
