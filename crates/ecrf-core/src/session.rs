//! The mapping session.
//!
//! A [`Session`] owns everything one mapping job touches: the catalog, the
//! loaded table and workbook, the mapping state and the cached validation
//! result. Mutation order is load, automap, manual edits, validate, export.
//! Any change to the table, sheet, schema or mapping drops the cached
//! validation result.

use std::path::{Path, PathBuf};

use ecrf_ingest::{CsvOptions, LoadedSource, SourceFormat, Workbook, load_source_async, parse_csv};
use ecrf_map::{MappingState, apply_value_corrections};
use ecrf_model::{Table, ValidationResult};
use ecrf_output::{filter_valid_rows, serialize};
use ecrf_standards::Catalog;
use ecrf_validate::validate;

use crate::error::{Result, SessionError};
use crate::policy::ExportPolicy;

/// Identifies one load request.
///
/// Only the ticket from the most recent [`Session::begin_load`] can commit
/// its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    path: PathBuf,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// What happened to a finished load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was committed to the session.
    Loaded { columns: usize, rows: usize },
    /// A newer load was started; the result was discarded.
    Stale,
}

/// Options for building an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub policy: ExportPolicy,
    /// Apply the study's value-correction dictionaries to mapped columns.
    pub correct_values: bool,
}

/// A rendered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedExport {
    pub csv: String,
    pub exported_rows: usize,
    pub skipped_rows: usize,
}

#[derive(Debug)]
struct Source {
    path: Option<PathBuf>,
    format: SourceFormat,
    workbook: Option<Workbook>,
    sheet: Option<String>,
    table: Table,
}

/// Owned state of one mapping job.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    csv_options: CsvOptions,
    mapping: MappingState,
    source: Option<Source>,
    validation: Option<ValidationResult>,
    generation: u64,
}

impl Session {
    /// Creates a session on the catalog's default study.
    pub fn new(catalog: Catalog) -> Self {
        let study = catalog.default_study();
        let mapping = MappingState::new(study.id.clone(), study.fields.clone(), Vec::new());
        Self {
            catalog,
            csv_options: CsvOptions::default(),
            mapping,
            source: None,
            validation: None,
            generation: 0,
        }
    }

    pub fn with_csv_options(mut self, options: CsvOptions) -> Self {
        self.csv_options = options;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn csv_options(&self) -> &CsvOptions {
        &self.csv_options
    }

    // === Study ===

    pub fn study(&self) -> &str {
        self.mapping.study()
    }

    /// Switches the active study and re-matches the loaded headers.
    pub fn select_study(&mut self, id: &str) -> Result<()> {
        let schema = self.catalog.select_study(id)?.to_vec();
        self.mapping.select_study(id, schema);
        self.invalidate();
        tracing::info!(study = id, "selected study");
        Ok(())
    }

    // === Loading ===

    /// Starts a load and returns the ticket that may commit it.
    pub fn begin_load(&mut self, path: impl Into<PathBuf>) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
            path: path.into(),
        }
    }

    /// Commits a load result if its ticket is still current.
    ///
    /// A failed load leaves the previous file in place.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: ecrf_ingest::Result<LoadedSource>,
    ) -> Result<LoadOutcome> {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                path = %ticket.path.display(),
                "discarding stale load"
            );
            return Ok(LoadOutcome::Stale);
        }

        let loaded = result.inspect_err(|err| {
            tracing::warn!(path = %ticket.path.display(), error = %err, "load failed");
        })?;
        let source = match loaded {
            LoadedSource::Csv(table) => Source {
                path: Some(ticket.path),
                format: SourceFormat::Csv,
                workbook: None,
                sheet: None,
                table,
            },
            LoadedSource::Excel {
                workbook,
                sheet,
                table,
            } => Source {
                path: Some(ticket.path),
                format: SourceFormat::Excel,
                workbook: Some(workbook),
                sheet: Some(sheet),
                table,
            },
        };
        Ok(self.install(source))
    }

    /// Reads and parses `path` off the current task, then commits it.
    ///
    /// Workbooks open on their first sheet.
    pub async fn load_file(&mut self, path: impl Into<PathBuf>) -> Result<LoadOutcome> {
        self.load_file_sheet(path, None).await
    }

    /// Like [`Session::load_file`], opening a workbook on `sheet` when given.
    ///
    /// The sheet is ignored for delimited files.
    pub async fn load_file_sheet(
        &mut self,
        path: impl Into<PathBuf>,
        sheet: Option<String>,
    ) -> Result<LoadOutcome> {
        let ticket = self.begin_load(path);
        let result = load_source_async(ticket.path.clone(), self.csv_options, sheet).await;
        self.finish_load(ticket, result)
    }

    /// Parses delimited text already in memory.
    pub fn load_text(&mut self, text: &str) -> Result<LoadOutcome> {
        self.generation += 1;
        let table = parse_csv(text, &self.csv_options)?;
        Ok(self.install(Source {
            path: None,
            format: SourceFormat::Csv,
            workbook: None,
            sheet: None,
            table,
        }))
    }

    fn install(&mut self, source: Source) -> LoadOutcome {
        let outcome = LoadOutcome::Loaded {
            columns: source.table.headers.len(),
            rows: source.table.row_count(),
        };
        self.mapping.remap(source.table.headers.clone());
        // Dropping the previous source releases its workbook.
        self.source = Some(source);
        self.invalidate();
        outcome
    }

    /// Drops the loaded file and its mapping.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.source = None;
        self.mapping.remap(Vec::new());
        self.invalidate();
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn table(&self) -> Option<&Table> {
        self.source.as_ref().map(|s| &s.table)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_ref().and_then(|s| s.path.as_deref())
    }

    pub fn source_format(&self) -> Option<SourceFormat> {
        self.source.as_ref().map(|s| s.format)
    }

    // === Sheets ===

    /// Sheet names of the loaded workbook; `None` for CSV input.
    pub fn sheet_names(&self) -> Option<&[String]> {
        self.source
            .as_ref()
            .and_then(|s| s.workbook.as_ref())
            .map(Workbook::sheet_names)
    }

    pub fn selected_sheet(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.sheet.as_deref())
    }

    /// Re-reads another sheet from the held workbook and re-matches.
    pub fn select_sheet(&mut self, name: &str) -> Result<LoadOutcome> {
        let source = self.source.as_mut().ok_or(SessionError::NoFileLoaded)?;
        let workbook = source.workbook.as_mut().ok_or(SessionError::NotAWorkbook)?;
        let table = workbook.read_sheet(name)?;

        let outcome = LoadOutcome::Loaded {
            columns: table.headers.len(),
            rows: table.row_count(),
        };
        self.mapping.remap(table.headers.clone());
        source.table = table;
        source.sheet = Some(name.to_string());
        self.invalidate();
        tracing::info!(sheet = name, "selected sheet");
        Ok(outcome)
    }

    // === Mapping ===

    pub fn mapping(&self) -> &MappingState {
        &self.mapping
    }

    pub fn set_mapping(&mut self, csv_column: &str, field: Option<&str>) -> Result<()> {
        self.mapping.set_mapping(csv_column, field)?;
        self.invalidate();
        Ok(())
    }

    /// Adds a custom field. Returns `false` when the trimmed name is blank.
    pub fn add_field(&mut self, name: &str) -> Result<bool> {
        let added = self.mapping.add_field(name)?;
        if added {
            self.invalidate();
        }
        Ok(added)
    }

    pub fn remove_field(&mut self, name: &str) -> Result<()> {
        self.mapping.remove_field(name)?;
        self.invalidate();
        Ok(())
    }

    /// Restores the study's catalog schema and re-matches.
    pub fn reset_schema(&mut self) {
        self.mapping.reset_schema();
        self.invalidate();
    }

    fn ensure_complete(&self) -> Result<()> {
        let missing = self.mapping.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SessionError::IncompleteMapping {
                missing: missing.into_iter().map(str::to_string).collect(),
            })
        }
    }

    // === Validation ===

    /// Validates the loaded table under the current mapping.
    ///
    /// Requires a loaded file and a complete mapping.
    pub fn validate(&mut self) -> Result<&ValidationResult> {
        let table = self.table().ok_or(SessionError::NoFileLoaded)?;
        self.ensure_complete()?;

        let result = validate(table, self.mapping.mappings(), self.mapping.schema());
        tracing::info!(
            rows = result.total_rows,
            invalid_rows = result.invalid_rows,
            errors = result.errors.len(),
            "validation finished"
        );
        Ok(&*self.validation.insert(result))
    }

    /// Yields once so a progress indicator can render, then validates.
    pub async fn validate_async(&mut self) -> Result<&ValidationResult> {
        tokio::task::yield_now().await;
        self.validate()
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    fn invalidate(&mut self) {
        self.validation = None;
    }

    // === Export ===

    /// Renders the export under `options`.
    ///
    /// Policies other than [`ExportPolicy::All`] validate first when no
    /// cached result exists.
    pub fn export(&mut self, options: ExportOptions) -> Result<PreparedExport> {
        if !self.is_loaded() {
            return Err(SessionError::NoFileLoaded);
        }
        self.ensure_complete()?;

        if options.policy.requires_validation() && self.validation.is_none() {
            self.validate()?;
        }

        let table = self.table().ok_or(SessionError::NoFileLoaded)?;
        let total = table.row_count();
        let rows = match (options.policy, self.validation.as_ref()) {
            (ExportPolicy::Block, Some(result)) if !result.is_valid => {
                tracing::warn!(invalid_rows = result.invalid_rows, "export blocked");
                return Err(SessionError::ExportBlocked {
                    invalid_rows: result.invalid_rows,
                });
            }
            (ExportPolicy::ValidOnly, Some(result)) => filter_valid_rows(&table.rows, result),
            _ => table.rows.clone(),
        };

        let rows = if options.correct_values {
            let corrections = self.catalog.value_corrections(self.mapping.study());
            apply_value_corrections(&rows, self.mapping.mappings(), &corrections)
        } else {
            rows
        };

        let csv = serialize(&rows, self.mapping.mappings())?;
        let exported_rows = rows.len();
        tracing::info!(
            policy = %options.policy,
            exported_rows,
            skipped_rows = total - exported_rows,
            "prepared export"
        );
        Ok(PreparedExport {
            csv,
            exported_rows,
            skipped_rows: total - exported_rows,
        })
    }
}
