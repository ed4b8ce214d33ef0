//! Mapped CSV export for the eCRF column mapper.
//!
//! # Features
//!
//! - **Projection**: Re-key input rows by schema field name
//! - **Serialization**: Comma-separated output with minimal quoting
//! - **Filtering**: Drop rows that failed validation
//! - **Export Files**: Timestamped file names and directory creation
//!
//! # Example
//!
//! ```
//! use ecrf_model::{ColumnMapping, Record};
//! use ecrf_output::serialize;
//!
//! let rows = vec![Record::from_pairs(&["subj"], &["001, A"])];
//! let mappings = vec![ColumnMapping::new("subj", Some("Subject".to_string()))];
//! assert_eq!(serialize(&rows, &mappings).unwrap(), "Subject\n\"001, A\"\n");
//! ```

mod csv;
mod error;
mod export;
mod filter;

// === Error Types ===
pub use error::{OutputError, Result};

// === Serialization ===
pub use csv::{SEPARATOR, escape_value, export_headers, project_row, project_rows, serialize};

// === Filtering ===
pub use filter::filter_valid_rows;

// === Export Files ===
pub use export::{EXPORT_PREFIX, export_file_name, write_csv, write_export};
