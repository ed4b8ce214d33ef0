//! Delimited text into [`Table`].

use ecrf_model::{Record, Table};

use super::tokenizer::split_line;
use crate::error::{IngestError, Result};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

const BOM: char = '\u{feff}';

/// Options for CSV parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: char,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }
}

/// Parses delimited text into headers and rows.
///
/// Lines are split on `\n` and lines that are blank after trimming are
/// discarded. The first remaining line is the header row. Data lines whose
/// field count differs from the header count are dropped without error.
pub fn parse_csv(text: &str, options: &CsvOptions) -> Result<Table> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(IngestError::EmptyFile)?;
    let headers = split_line(header_line, options.delimiter);

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for (idx, line) in lines.enumerate() {
        let values = split_line(line, options.delimiter);
        if values.len() != headers.len() {
            dropped += 1;
            tracing::debug!(
                line = idx + 2,
                expected = headers.len(),
                found = values.len(),
                "dropping row with mismatched field count"
            );
            continue;
        }
        rows.push(Record::from_pairs(&headers, &values));
    }

    tracing::debug!(
        columns = headers.len(),
        rows = rows.len(),
        dropped,
        "parsed delimited text"
    );

    Ok(Table::new(headers, rows))
}
