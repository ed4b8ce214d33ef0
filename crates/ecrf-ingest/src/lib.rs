//! Tabular input parsing for the eCRF column mapper.
//!
//! Turns heterogeneous spreadsheet-like files into a uniform
//! [`Table`](ecrf_model::Table) of headers and string-keyed rows.
//!
//! # Features
//!
//! - **CSV Parsing**: Quote-aware line tokenizer with a configurable delimiter
//! - **Excel Workbooks**: `.xlsx` / `.xls` via calamine, with sheet selection
//! - **Format Detection**: Extension-based dispatch between the two
//! - **Async Loading**: File reads on tokio's blocking pool
//!
//! # Example
//!
//! ```
//! use ecrf_ingest::{CsvOptions, parse_csv};
//!
//! let table = parse_csv("Subject,Visit\n001,Screening\n", &CsvOptions::default()).unwrap();
//! assert_eq!(table.headers, vec!["Subject", "Visit"]);
//! assert_eq!(table.rows[0].get("Visit"), Some("Screening"));
//! ```

mod csv;
mod error;
mod excel;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Parsing ===
pub use csv::{CsvOptions, DEFAULT_DELIMITER, parse_csv, split_line};

// === Excel Reading ===
pub use excel::Workbook;

// === File Loading ===
pub use source::{LoadedSource, SourceFormat, load_source, load_source_async};
