//! Command workflows, independent of argument parsing and terminal output.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use ecrf_core::{ExportOptions, Session, SessionError};
use ecrf_ingest::{CsvOptions, SourceFormat, Workbook};
use ecrf_map::MappingSummary;
use ecrf_model::{FieldType, ValidationResult};
use ecrf_output::{write_csv, write_export};
use ecrf_standards::Catalog;

/// Loads the catalog at `path`, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            Catalog::load(path).with_context(|| format!("load catalog {}", path.display()))
        }
        None => Catalog::embedded().context("load built-in catalog"),
    }
}

/// One `COLUMN=FIELD` argument. An empty field clears the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub column: String,
    pub field: Option<String>,
}

impl FromStr for Assignment {
    type Err = String;

    /// Splits on the last `=`, so column headers may themselves contain `=`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let Some((column, field)) = s.rsplit_once('=') else {
            return Err(format!("expected COLUMN=FIELD, got '{s}'"));
        };
        let column = column.trim();
        if column.is_empty() {
            return Err(format!("missing column name in '{s}'"));
        }
        let field = field.trim();
        Ok(Self {
            column: column.to_string(),
            field: (!field.is_empty()).then(|| field.to_string()),
        })
    }
}

/// Parses a delimiter argument. Accepts a single character, `tab` or `\t`.
pub fn parse_delimiter(s: &str) -> std::result::Result<char, String> {
    match s {
        "tab" | "\\t" | "\t" => return Ok('\t'),
        _ => {}
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '"' && c != '\n' => Ok(c),
        (Some('"' | '\n'), None) => Err(format!(
            "'{}' cannot be used as a delimiter",
            s.escape_default()
        )),
        _ => Err(format!("delimiter must be a single character, got '{s}'")),
    }
}

/// Where an export is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Exact file path.
    File(PathBuf),
    /// Directory receiving a timestamped file name.
    Directory(PathBuf),
    /// Prepare the export but write nothing.
    DryRun,
}

/// Everything `map` needs, already resolved against settings.
#[derive(Debug, Clone)]
pub struct MapRequest {
    pub input: PathBuf,
    pub study: Option<String>,
    pub sheet: Option<String>,
    pub delimiter: char,
    pub add_fields: Vec<String>,
    pub remove_fields: Vec<String>,
    pub assignments: Vec<Assignment>,
    pub validate: bool,
    pub export: ExportOptions,
    pub destination: Destination,
}

/// One line of the mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingRow {
    pub column: String,
    pub field: Option<String>,
    /// Field label, or the field name when the catalog gives none.
    pub label: Option<String>,
    pub field_type: Option<FieldType>,
    pub required: bool,
}

/// How a `map` run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MapStatus {
    Exported {
        path: PathBuf,
        exported_rows: usize,
        skipped_rows: usize,
    },
    DryRun {
        exported_rows: usize,
        skipped_rows: usize,
    },
    /// Required fields are still unmapped; nothing was exported.
    Incomplete,
    /// The block policy refused the export.
    Blocked { invalid_rows: usize },
}

impl MapStatus {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exported { .. } | Self::DryRun { .. } => 0,
            Self::Incomplete => 1,
            Self::Blocked { .. } => 2,
        }
    }
}

/// Result of a `map` run.
#[derive(Debug, Clone, Serialize)]
pub struct MapReport {
    pub input: PathBuf,
    pub format: &'static str,
    pub sheet: Option<String>,
    pub sheets: Vec<String>,
    pub study: String,
    pub rows: usize,
    pub mappings: Vec<MappingRow>,
    pub summary: MappingSummary,
    pub missing_required: Vec<String>,
    pub added_fields: Vec<String>,
    pub validation: Option<ValidationResult>,
    pub status: MapStatus,
}

/// Runs load, mapping edits, validation and export for one file.
#[tracing::instrument(name = "map", skip_all, fields(input = %request.input.display()))]
pub async fn run_map(catalog: Catalog, request: &MapRequest) -> Result<MapReport> {
    let mut session =
        Session::new(catalog).with_csv_options(CsvOptions::with_delimiter(request.delimiter));
    if let Some(study) = &request.study {
        session.select_study(study)?;
    }

    session
        .load_file_sheet(&request.input, request.sheet.clone())
        .await?;

    let mut added_fields = Vec::new();
    for name in &request.add_fields {
        if session.add_field(name)? {
            added_fields.push(name.trim().to_string());
        }
    }
    for name in &request.remove_fields {
        session.remove_field(name)?;
    }
    for assignment in &request.assignments {
        session.set_mapping(&assignment.column, assignment.field.as_deref())?;
    }

    // Incomplete mappings are reported through the export status below.
    if request.validate && session.mapping().is_complete() {
        session.validate_async().await?;
    }

    let status = match session.export(request.export) {
        Ok(prepared) => {
            let skipped_rows = prepared.skipped_rows;
            let exported_rows = prepared.exported_rows;
            match &request.destination {
                Destination::DryRun => MapStatus::DryRun {
                    exported_rows,
                    skipped_rows,
                },
                Destination::File(path) => {
                    write_csv(path, &prepared.csv).map_err(SessionError::from)?;
                    MapStatus::Exported {
                        path: path.clone(),
                        exported_rows,
                        skipped_rows,
                    }
                }
                Destination::Directory(dir) => {
                    let path = write_export(dir, &prepared.csv).map_err(SessionError::from)?;
                    MapStatus::Exported {
                        path,
                        exported_rows,
                        skipped_rows,
                    }
                }
            }
        }
        Err(SessionError::IncompleteMapping { .. }) => MapStatus::Incomplete,
        Err(SessionError::ExportBlocked { invalid_rows }) => MapStatus::Blocked { invalid_rows },
        Err(error) => return Err(error.into()),
    };

    Ok(build_report(&session, request, added_fields, status))
}

fn build_report(
    session: &Session,
    request: &MapRequest,
    added_fields: Vec<String>,
    status: MapStatus,
) -> MapReport {
    let mapping = session.mapping();
    let mappings = mapping
        .mappings()
        .iter()
        .map(|entry| {
            let field = entry
                .schema_column
                .as_deref()
                .and_then(|name| mapping.field(name));
            MappingRow {
                column: entry.csv_column.clone(),
                field: entry.schema_column.clone(),
                label: field.map(|f| f.display_name().to_string()),
                field_type: field.map(|f| f.field_type),
                required: field.is_some_and(|f| f.required),
            }
        })
        .collect();

    MapReport {
        input: request.input.clone(),
        format: session
            .source_format()
            .map_or(SourceFormat::Csv.label(), |format| format.label()),
        sheet: session.selected_sheet().map(str::to_string),
        sheets: session.sheet_names().map(<[String]>::to_vec).unwrap_or_default(),
        study: session.study().to_string(),
        rows: session.table().map_or(0, |table| table.row_count()),
        mappings,
        summary: mapping.summary(),
        missing_required: mapping
            .missing_required()
            .into_iter()
            .map(str::to_string)
            .collect(),
        added_fields,
        validation: session.validation().cloned(),
        status,
    }
}

/// Catalog overview line for `studies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyOverview {
    pub id: String,
    pub fields: usize,
    pub required: usize,
    /// Fields with value corrections.
    pub corrected_fields: usize,
}

pub fn study_overview(catalog: &Catalog) -> Vec<StudyOverview> {
    catalog
        .studies()
        .iter()
        .map(|study| StudyOverview {
            id: study.id.clone(),
            fields: study.fields.len(),
            required: study.required_fields().count(),
            corrected_fields: catalog.value_corrections(&study.id).fields().count(),
        })
        .collect()
}

/// Sheet names of an Excel workbook, in workbook order.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    let format = SourceFormat::from_path(path).map_err(SessionError::from)?;
    if format != SourceFormat::Excel {
        bail!(SessionError::NotAWorkbook);
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let workbook = Workbook::open(bytes).map_err(SessionError::from)?;
    Ok(workbook.sheet_names().to_vec())
}
