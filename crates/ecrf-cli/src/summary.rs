use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ecrf_cli::workflow::{MapReport, MapStatus, MappingRow, StudyOverview};
use ecrf_model::ValidationResult;

/// Findings listed before the table is cut off.
const MAX_LISTED_ERRORS: usize = 50;

pub fn print_studies(studies: &[StudyOverview]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Study"),
        header_cell("Fields"),
        header_cell("Required"),
        header_cell("Corrected fields"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for study in studies {
        table.add_row(vec![
            Cell::new(&study.id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(study.fields),
            Cell::new(study.required),
            count_cell(study.corrected_fields, Color::Cyan),
        ]);
    }
    println!("{table}");
}

pub fn print_sheets(sheets: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Sheet")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, name) in sheets.iter().enumerate() {
        table.add_row(vec![Cell::new(index + 1), Cell::new(name)]);
    }
    println!("{table}");
}

pub fn print_report(report: &MapReport) {
    println!("Input: {} ({})", report.input.display(), report.format);
    if let Some(sheet) = &report.sheet {
        println!("Sheet: {sheet} of {}", report.sheets.join(", "));
    }
    println!("Study: {}", report.study);
    println!("Rows: {}", report.rows);
    if !report.added_fields.is_empty() {
        println!("Custom fields: {}", report.added_fields.join(", "));
    }
    println!();
    print_mapping_table(&report.mappings);
    println!(
        "Mapped {}/{} columns, {}/{} required fields",
        report.summary.mapped_columns,
        report.summary.total_columns,
        report.summary.required_mapped,
        report.summary.required_total
    );
    if let Some(result) = &report.validation {
        print_validation(result);
    }
    println!();
    print_status(report);
}

fn print_mapping_table(rows: &[MappingRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Required"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    for row in rows {
        let field_cell = match &row.field {
            Some(field) => Cell::new(field).fg(Color::Green),
            None => dim_cell("(unmapped)"),
        };
        let label_cell = match &row.label {
            Some(label) => Cell::new(label),
            None => dim_cell("-"),
        };
        let type_cell = match row.field_type {
            Some(field_type) => Cell::new(field_type),
            None => dim_cell("-"),
        };
        let required_cell = if row.required {
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&row.column),
            field_cell,
            label_cell,
            type_cell,
            required_cell,
        ]);
    }
    println!("{table}");
}

fn print_validation(result: &ValidationResult) {
    println!();
    if result.is_valid {
        println!("Validation: all {} rows valid", result.total_rows);
        return;
    }
    println!(
        "Validation: {} valid, {} invalid of {} rows ({} errors)",
        result.valid_rows,
        result.invalid_rows,
        result.total_rows,
        result.error_count()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for error in result.errors.iter().take(MAX_LISTED_ERRORS) {
        let value_cell = match &error.value {
            Some(value) if !value.trim().is_empty() => Cell::new(value),
            _ => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(error.row_index),
            Cell::new(&error.field),
            value_cell,
            Cell::new(&error.message).fg(Color::Red),
        ]);
    }
    println!("{table}");
    let hidden = result.errors.len().saturating_sub(MAX_LISTED_ERRORS);
    if hidden > 0 {
        println!("... and {hidden} more");
    }
}

fn print_status(report: &MapReport) {
    match &report.status {
        MapStatus::Exported {
            path,
            exported_rows,
            skipped_rows,
        } => {
            println!("Exported {exported_rows} rows to {}", path.display());
            if *skipped_rows > 0 {
                println!("Skipped {skipped_rows} invalid rows");
            }
        }
        MapStatus::DryRun {
            exported_rows,
            skipped_rows,
        } => {
            println!("Dry run: {exported_rows} rows would be exported, {skipped_rows} skipped");
        }
        MapStatus::Incomplete => {
            eprintln!(
                "Not exported. Map the required fields first: {}",
                report.missing_required.join(", ")
            );
        }
        MapStatus::Blocked { invalid_rows } => {
            eprintln!("Export blocked: {invalid_rows} rows failed validation");
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
