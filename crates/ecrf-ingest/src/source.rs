//! File format detection and whole-file loading.

use std::fs;
use std::path::{Path, PathBuf};

use ecrf_model::Table;

use crate::csv::{CsvOptions, parse_csv};
use crate::error::{IngestError, Result};
use crate::excel::Workbook;

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Excel,
}

impl SourceFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx" | "xls") => Ok(Self::Excel),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Excel => "Excel",
        }
    }
}

/// Result of loading an input file.
#[derive(Debug)]
pub enum LoadedSource {
    Csv(Table),
    /// Excel input keeps the opened workbook so other sheets can be read later.
    Excel {
        workbook: Workbook,
        sheet: String,
        table: Table,
    },
}

impl LoadedSource {
    pub fn table(&self) -> &Table {
        match self {
            Self::Csv(table) | Self::Excel { table, .. } => table,
        }
    }

    pub fn format(&self) -> SourceFormat {
        match self {
            Self::Csv(_) => SourceFormat::Csv,
            Self::Excel { .. } => SourceFormat::Excel,
        }
    }
}

/// Reads and parses a file on the current thread.
///
/// CSV text is decoded as UTF-8 with invalid sequences replaced. Excel input
/// reads `sheet` when given, otherwise the first sheet.
pub fn load_source(path: &Path, options: &CsvOptions, sheet: Option<&str>) -> Result<LoadedSource> {
    let format = SourceFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let loaded = match format {
        SourceFormat::Csv => {
            let text = String::from_utf8_lossy(&bytes);
            LoadedSource::Csv(parse_csv(&text, options)?)
        }
        SourceFormat::Excel => {
            let mut workbook = Workbook::open(bytes)?;
            let sheet = sheet.unwrap_or(workbook.first_sheet()).to_string();
            let table = workbook.read_sheet(&sheet)?;
            LoadedSource::Excel {
                workbook,
                sheet,
                table,
            }
        }
    };

    tracing::info!(
        path = %path.display(),
        format = format.label(),
        columns = loaded.table().headers.len(),
        rows = loaded.table().row_count(),
        "loaded input file"
    );

    Ok(loaded)
}

/// Reads and parses a file on tokio's blocking pool.
pub async fn load_source_async(
    path: PathBuf,
    options: CsvOptions,
    sheet: Option<String>,
) -> Result<LoadedSource> {
    tokio::task::spawn_blocking(move || load_source(&path, &options, sheet.as_deref()))
        .await
        .map_err(|e| IngestError::LoadTask {
            message: e.to_string(),
        })?
}
