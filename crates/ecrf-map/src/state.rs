//! Mapping state for an interactive session.
//!
//! [`MappingState`] owns the active study's working schema, the lookup built
//! from it, and the mapping list for the currently loaded headers. All
//! mutations keep the three consistent.

use serde::Serialize;

use ecrf_model::{ColumnMapping, FieldType, SchemaField};

use crate::error::{MappingError, Result};
use crate::lookup::SchemaLookup;
use crate::matcher::{auto_match, is_complete, missing_required, set_mapping};

/// Description given to fields added at runtime.
pub const CUSTOM_FIELD_DESCRIPTION: &str = "Custom field";

/// Mapping workflow state for one study and one table.
#[derive(Debug, Clone)]
pub struct MappingState {
    study: String,
    /// Schema as loaded from the catalog, restored by `reset_schema`.
    catalog_schema: Vec<SchemaField>,
    /// Working schema, including runtime edits.
    schema: Vec<SchemaField>,
    lookup: SchemaLookup,
    headers: Vec<String>,
    mappings: Vec<ColumnMapping>,
}

impl MappingState {
    /// Creates the state and auto-matches `headers` against `schema`.
    pub fn new(study: impl Into<String>, schema: Vec<SchemaField>, headers: Vec<String>) -> Self {
        let lookup = SchemaLookup::from_schema(&schema);
        let mappings = auto_match(&headers, &lookup);
        Self {
            study: study.into(),
            catalog_schema: schema.clone(),
            schema,
            lookup,
            headers,
            mappings,
        }
    }

    pub fn study(&self) -> &str {
        &self.study
    }

    pub fn schema(&self) -> &[SchemaField] {
        &self.schema
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    /// Replaces the active study and schema wholesale, then re-matches.
    pub fn select_study(&mut self, study: impl Into<String>, schema: Vec<SchemaField>) {
        self.study = study.into();
        self.catalog_schema = schema.clone();
        self.schema = schema;
        self.rebuild();
        tracing::debug!(study = %self.study, fields = self.schema.len(), "selected study");
    }

    /// Discards runtime schema edits and manual overrides.
    pub fn reset_schema(&mut self) {
        self.schema = self.catalog_schema.clone();
        self.rebuild();
    }

    /// Re-matches a new set of headers against the working schema.
    pub fn remap(&mut self, headers: Vec<String>) {
        self.headers = headers;
        self.mappings = auto_match(&self.headers, &self.lookup);
    }

    /// Sets or clears the target of a column.
    ///
    /// The target, when given, must name a field of the working schema.
    pub fn set_mapping(&mut self, csv_column: &str, field: Option<&str>) -> Result<()> {
        if let Some(name) = field
            && self.field(name).is_none()
        {
            return Err(MappingError::FieldNotFound(name.to_string()));
        }
        set_mapping(&mut self.mappings, csv_column, field)
    }

    /// Appends an optional string field to the working schema.
    ///
    /// The name is trimmed; a blank name is ignored and returns `Ok(false)`.
    /// Existing mappings are left untouched.
    pub fn add_field(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        if self.field(name).is_some() {
            return Err(MappingError::DuplicateField(name.to_string()));
        }

        self.schema.push(
            SchemaField::new(name)
                .with_type(FieldType::String)
                .with_description(CUSTOM_FIELD_DESCRIPTION),
        );
        self.lookup.insert(name);
        tracing::debug!(field = name, "added custom field");
        Ok(true)
    }

    /// Removes a field from the working schema and clears every mapping
    /// that targeted it.
    pub fn remove_field(&mut self, name: &str) -> Result<()> {
        let before = self.schema.len();
        self.schema.retain(|f| f.name != name);
        if self.schema.len() == before {
            return Err(MappingError::FieldNotFound(name.to_string()));
        }

        self.lookup = SchemaLookup::from_schema(&self.schema);
        let mut cleared = 0usize;
        for mapping in self.mappings.iter_mut().filter(|m| m.targets(name)) {
            mapping.schema_column = None;
            cleared += 1;
        }
        tracing::debug!(field = name, cleared, "removed field");
        Ok(())
    }

    /// Field definition by exact name.
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.schema.iter().find(|f| f.name == name)
    }

    /// Target field names in mapping order, duplicates included.
    pub fn mapped_fields(&self) -> Vec<&str> {
        self.mappings
            .iter()
            .filter_map(|m| m.schema_column.as_deref())
            .collect()
    }

    pub fn missing_required(&self) -> Vec<&str> {
        missing_required(&self.mappings, &self.schema)
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.mappings, &self.schema)
    }

    pub fn summary(&self) -> MappingSummary {
        let required_total = self.schema.iter().filter(|f| f.required).count();
        MappingSummary {
            total_columns: self.mappings.len(),
            mapped_columns: self.mappings.iter().filter(|m| m.is_mapped()).count(),
            schema_fields: self.schema.len(),
            required_total,
            required_mapped: required_total - self.missing_required().len(),
        }
    }

    fn rebuild(&mut self) {
        self.lookup = SchemaLookup::from_schema(&self.schema);
        self.mappings = auto_match(&self.headers, &self.lookup);
    }
}

/// Counts describing how far a mapping has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    /// Number of input columns.
    pub total_columns: usize,
    /// Input columns with a target field.
    pub mapped_columns: usize,
    /// Fields in the working schema.
    pub schema_fields: usize,
    /// Required fields in the working schema.
    pub required_total: usize,
    /// Required fields targeted by at least one column.
    pub required_mapped: usize,
}
