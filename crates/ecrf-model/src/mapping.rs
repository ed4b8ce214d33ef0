//! Column-to-field mapping entries.

use serde::{Deserialize, Serialize};

/// Association between one input column and at most one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Header of the input table this entry belongs to.
    pub csv_column: String,
    /// Target schema field name, `None` when unmapped.
    pub schema_column: Option<String>,
}

impl ColumnMapping {
    pub fn new(csv_column: impl Into<String>, schema_column: Option<String>) -> Self {
        Self {
            csv_column: csv_column.into(),
            schema_column,
        }
    }

    pub fn unmapped(csv_column: impl Into<String>) -> Self {
        Self::new(csv_column, None)
    }

    pub fn is_mapped(&self) -> bool {
        self.schema_column.is_some()
    }

    /// True when this entry targets `field`.
    pub fn targets(&self, field: &str) -> bool {
        self.schema_column.as_deref() == Some(field)
    }
}
