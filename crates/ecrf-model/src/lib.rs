//! Data model for the eCRF column mapper.
//!
//! These are plain data types shared by every stage of the pipeline:
//! ingestion produces a [`Table`], the mapper produces [`ColumnMapping`]
//! entries against a schema of [`SchemaField`]s, and the validator produces a
//! [`ValidationResult`].

pub mod mapping;
pub mod schema;
pub mod table;
pub mod validation;

pub use mapping::ColumnMapping;
pub use schema::{FieldType, SchemaField};
pub use table::{Record, Table};
pub use validation::{Severity, ValidationError, ValidationResult};
