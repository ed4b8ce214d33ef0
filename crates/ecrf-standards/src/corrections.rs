//! Per-study value correction dictionaries.
//!
//! Vendors often export free-text or localized values for fields that the
//! study expects as a fixed vocabulary. A correction maps one exact source
//! value to its canonical replacement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One `original -> corrected` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCorrection {
    pub original: String,
    pub corrected: String,
}

/// A block of corrections for one field of one study, as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionSet {
    pub study: String,
    pub field: String,
    #[serde(default)]
    pub values: Vec<ValueCorrection>,
}

/// Corrections for one study, indexed by field name then original value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCorrections {
    by_field: BTreeMap<String, BTreeMap<String, String>>,
}

impl ValueCorrections {
    /// Merge a correction block. Later entries for the same value win.
    pub fn extend(&mut self, set: &CorrectionSet) {
        let entries = self.by_field.entry(set.field.clone()).or_default();
        for value in &set.values {
            entries.insert(value.original.clone(), value.corrected.clone());
        }
    }

    pub fn insert(
        &mut self,
        field: impl Into<String>,
        original: impl Into<String>,
        corrected: impl Into<String>,
    ) {
        self.by_field
            .entry(field.into())
            .or_default()
            .insert(original.into(), corrected.into());
    }

    /// Canonical replacement for `value` in `field`, if one is registered.
    pub fn correct(&self, field: &str, value: &str) -> Option<&str> {
        self.by_field
            .get(field)
            .and_then(|entries| entries.get(value))
            .map(String::as_str)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.by_field.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.by_field.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }
}
