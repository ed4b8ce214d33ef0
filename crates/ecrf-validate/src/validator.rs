//! Row validation against the active schema.

use ecrf_model::{
    ColumnMapping, FieldType, Record, SchemaField, Table, ValidationError, ValidationResult,
};

use crate::coerce;

/// Validates every row of `table` under `mappings` and `schema`.
///
/// Callers are expected to check mapping completeness first. An unmapped
/// required field still produces one error per row.
pub fn validate(
    table: &Table,
    mappings: &[ColumnMapping],
    schema: &[SchemaField],
) -> ValidationResult {
    let mut errors = Vec::new();
    for (idx, row) in table.rows.iter().enumerate() {
        validate_row(idx + 1, row, mappings, schema, &mut errors);
    }

    let result = ValidationResult::from_errors(table.row_count(), errors);
    tracing::debug!(
        rows = result.total_rows,
        errors = result.errors.len(),
        invalid_rows = result.invalid_rows,
        "validated mapped rows"
    );
    result
}

/// Appends the errors for one 1-based row.
pub fn validate_row(
    row_index: usize,
    row: &Record,
    mappings: &[ColumnMapping],
    schema: &[SchemaField],
    errors: &mut Vec<ValidationError>,
) {
    for field in schema.iter().filter(|f| f.required) {
        match mappings.iter().find(|m| m.targets(&field.name)) {
            None => errors.push(ValidationError::error(
                row_index,
                &field.name,
                None,
                format!("Required field '{}' is not mapped", field.name),
            )),
            Some(mapping) if row.is_blank(&mapping.csv_column) => {
                errors.push(ValidationError::error(
                    row_index,
                    &field.name,
                    None,
                    format!("Required field '{}' is empty", field.name),
                ));
            }
            Some(_) => {}
        }
    }

    for mapping in mappings {
        let Some(target) = mapping.schema_column.as_deref() else {
            continue;
        };
        let Some(field) = schema.iter().find(|f| f.name == target) else {
            continue;
        };
        let Some(value) = row.get(&mapping.csv_column).filter(|v| !v.is_empty()) else {
            continue;
        };

        let message = match field.field_type {
            FieldType::Date if !coerce::is_date(value) => {
                format!("Invalid date format for '{}'", field.name)
            }
            FieldType::Number if !coerce::is_number(value) => {
                format!("Invalid numeric value for '{}'", field.name)
            }
            _ => continue,
        };
        errors.push(ValidationError::error(
            row_index,
            &field.name,
            Some(value.to_string()),
            message,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter().map(|r| Record::from_pairs(headers, r)).collect(),
        )
    }

    fn identity(headers: &[&str]) -> Vec<ColumnMapping> {
        headers
            .iter()
            .map(|h| ColumnMapping::new(*h, Some(h.to_string())))
            .collect()
    }

    #[test]
    fn empty_required_value_on_third_row() {
        let headers = ["Subject", "Visit"];
        let table = table(
            &headers,
            &[&["001", "V1"], &["002", "V1"], &["", "V2"], &["004", "V3"]],
        );
        let schema = vec![SchemaField::new("Subject").required(), SchemaField::new("Visit")];

        let result = validate(&table, &identity(&headers), &schema);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row_index, 3);
        assert_eq!(result.errors[0].message, "Required field 'Subject' is empty");
        assert_eq!(result.invalid_rows, 1);
        assert_eq!(result.valid_rows, 3);
    }

    #[test]
    fn unmapped_required_field_repeats_per_row() {
        let table = table(&["A"], &[&["1"], &["2"]]);
        let schema = vec![SchemaField::new("Subject").required()];
        let result = validate(&table, &[ColumnMapping::unmapped("A")], &schema);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().all(|e| e.value.is_none()));
        assert_eq!(result.errors[1].message, "Required field 'Subject' is not mapped");
        assert_eq!(result.invalid_rows, 2);
    }

    #[test]
    fn type_errors_carry_raw_value() {
        let headers = ["Scan Date", "Weight"];
        let table = table(&headers, &[&["2024-01-05", "70"], &["soon", "heavy"], &["", ""]]);
        let schema = vec![
            SchemaField::new("Scan Date").with_type(FieldType::Date),
            SchemaField::new("Weight").with_type(FieldType::Number),
        ];

        let result = validate(&table, &identity(&headers), &schema);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].row_index, 2);
        assert_eq!(result.errors[0].value.as_deref(), Some("soon"));
        assert_eq!(result.errors[0].message, "Invalid date format for 'Scan Date'");
        assert_eq!(result.errors[1].message, "Invalid numeric value for 'Weight'");
        assert_eq!(result.invalid_rows, 1);
    }

    #[test]
    fn every_mapping_to_a_typed_field_is_checked() {
        let table = table(&["d1", "d2"], &[&["2024-01-01", "bad"]]);
        let schema = vec![SchemaField::new("Date").with_type(FieldType::Date)];
        let mappings = vec![
            ColumnMapping::new("d1", Some("Date".to_string())),
            ColumnMapping::new("d2", Some("Date".to_string())),
        ];
        let result = validate(&table, &mappings, &schema);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].value.as_deref(), Some("bad"));
    }

    #[test]
    fn required_check_uses_first_targeting_column() {
        let table = table(&["s1", "s2"], &[&["", "002"]]);
        let schema = vec![SchemaField::new("Subject").required()];
        let mappings = vec![
            ColumnMapping::new("s1", Some("Subject".to_string())),
            ColumnMapping::new("s2", Some("Subject".to_string())),
        ];
        let result = validate(&table, &mappings, &schema);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn mappings_to_unknown_fields_are_skipped() {
        let table = table(&["x"], &[&["not a number"]]);
        let mappings = vec![ColumnMapping::new("x", Some("Removed".to_string()))];
        let result = validate(&table, &mappings, &[]);
        assert!(result.is_valid);
        assert_eq!(result.valid_rows, 1);
    }

    #[test]
    fn empty_table_is_valid() {
        let result = validate(&Table::default(), &[], &[SchemaField::new("A").required()]);
        assert!(result.is_valid);
        assert_eq!(result.total_rows, 0);
    }
}
