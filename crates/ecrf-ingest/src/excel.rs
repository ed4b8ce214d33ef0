//! Excel workbook reading via calamine.
//!
//! A [`Workbook`] owns the decoded container so the caller can switch
//! between sheets without touching the file system again.

use std::fmt;
use std::io::Cursor;

use calamine::{Data, DataType, Reader, Sheets, open_workbook_auto_from_rs};
use chrono::{NaiveDateTime, NaiveTime};

use ecrf_model::{Record, Table};

use crate::error::{IngestError, Result};

/// An opened `.xlsx` / `.xls` workbook held in memory.
pub struct Workbook {
    sheets: Sheets<Cursor<Vec<u8>>>,
    sheet_names: Vec<String>,
}

impl Workbook {
    /// Decodes a workbook from its raw bytes.
    ///
    /// Fails with [`IngestError::EmptyWorkbook`] when the workbook lists no
    /// sheets.
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let sheet_names = sheets.sheet_names();
        if sheet_names.is_empty() {
            return Err(IngestError::EmptyWorkbook);
        }
        tracing::debug!(sheets = sheet_names.len(), "opened workbook");
        Ok(Self {
            sheets,
            sheet_names,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Name of the first sheet, the default selection.
    pub fn first_sheet(&self) -> &str {
        // open() rejects workbooks without sheets
        &self.sheet_names[0]
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names.iter().any(|s| s == name)
    }

    /// Reads one sheet into a [`Table`].
    ///
    /// Row 0 is the header row. Header cells that are blank after trimming
    /// are named `Column N` by 1-based position. Data rows map positionally
    /// onto the headers; missing trailing cells become empty strings.
    pub fn read_sheet(&mut self, name: &str) -> Result<Table> {
        if !self.has_sheet(name) {
            return Err(IngestError::MissingSheet {
                name: name.to_string(),
            });
        }

        let range = self.sheets.worksheet_range(name)?;
        let mut rows = range.rows();

        let header_row = rows.next().ok_or(IngestError::EmptyFile)?;
        let headers: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let value = render_cell(cell);
                if value.trim().is_empty() {
                    format!("Column {}", idx + 1)
                } else {
                    value
                }
            })
            .collect();

        let records: Vec<Record> = rows
            .map(|row| {
                let values: Vec<String> = row.iter().map(render_cell).collect();
                Record::from_pairs(&headers, &values)
            })
            .collect();

        tracing::debug!(
            sheet = name,
            columns = headers.len(),
            rows = records.len(),
            "read worksheet"
        );

        Ok(Table::new(headers, records))
    }
}

impl fmt::Debug for Workbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workbook")
            .field("sheet_names", &self.sheet_names)
            .finish_non_exhaustive()
    }
}

/// Renders a raw cell as text. Serial date cells become ISO 8601 strings.
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
