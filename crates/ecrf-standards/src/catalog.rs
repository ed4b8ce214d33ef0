//! Study schema catalog.
//!
//! A catalog maps study identifiers to ordered schema field lists. It is
//! read-only at runtime; sessions copy the selected study's fields before
//! editing them.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ecrf_model::SchemaField;

use crate::corrections::{CorrectionSet, ValueCorrections};
use crate::embedded::{DEFAULT_CATALOG, DEFAULT_CATALOG_ORIGIN};
use crate::error::{Result, StandardsError};

/// One study definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    pub id: String,
    #[serde(default, rename = "field")]
    pub fields: Vec<SchemaField>,
}

impl Study {
    pub fn required_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|f| f.required)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    study: Vec<Study>,
    #[serde(default)]
    correction: Vec<CorrectionSet>,
}

/// Loaded schema catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    studies: Vec<Study>,
    corrections: Vec<CorrectionSet>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CATALOG, DEFAULT_CATALOG_ORIGIN)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| StandardsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parse a catalog document. `origin` names the source in errors.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        let document: CatalogDocument =
            toml::from_str(content).map_err(|source| StandardsError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        if document.study.is_empty() {
            return Err(StandardsError::EmptyCatalog {
                origin: origin.to_string(),
            });
        }

        let mut ids = BTreeSet::new();
        for study in &document.study {
            if !ids.insert(study.id.as_str()) {
                return Err(StandardsError::DuplicateStudy {
                    id: study.id.clone(),
                });
            }
            let mut names = BTreeSet::new();
            for field in &study.fields {
                if !names.insert(field.name.as_str()) {
                    return Err(StandardsError::DuplicateField {
                        study: study.id.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            origin,
            studies = document.study.len(),
            corrections = document.correction.len(),
            "loaded study catalog"
        );

        Ok(Self {
            studies: document.study,
            corrections: document.correction,
        })
    }

    /// Study identifiers in catalog order.
    pub fn list_studies(&self) -> Vec<&str> {
        self.studies.iter().map(|s| s.id.as_str()).collect()
    }

    /// First study in the catalog; the default selection.
    pub fn default_study(&self) -> &Study {
        // from_toml_str rejects empty catalogs
        &self.studies[0]
    }

    pub fn study(&self, id: &str) -> Option<&Study> {
        self.studies.iter().find(|s| s.id == id)
    }

    pub fn studies(&self) -> &[Study] {
        &self.studies
    }

    /// Schema of the given study.
    pub fn select_study(&self, id: &str) -> Result<&[SchemaField]> {
        self.study(id)
            .map(|s| s.fields.as_slice())
            .ok_or_else(|| StandardsError::UnknownStudy { id: id.to_string() })
    }

    /// Value corrections registered for a study, merged per field.
    pub fn value_corrections(&self, study: &str) -> ValueCorrections {
        let mut corrections = ValueCorrections::default();
        for set in self.corrections.iter().filter(|c| c.study == study) {
            corrections.extend(set);
        }
        corrections
    }
}
