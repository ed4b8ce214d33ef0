//! Name lookup over the active schema.

use std::collections::HashMap;

use ecrf_model::SchemaField;

/// Normalizes a header or field name for matching: trimmed and lowercased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Read-only dictionary from header spellings to canonical field names.
///
/// Each field is registered under its exact name and its normalized name.
/// When two fields collide on a key the later one wins.
#[derive(Debug, Clone, Default)]
pub struct SchemaLookup {
    keys: HashMap<String, String>,
}

impl SchemaLookup {
    pub fn from_schema(schema: &[SchemaField]) -> Self {
        let mut lookup = Self::default();
        for field in schema {
            lookup.insert(&field.name);
        }
        lookup
    }

    /// Registers one field name.
    pub fn insert(&mut self, name: &str) {
        self.keys.insert(name.to_string(), name.to_string());
        self.keys.insert(normalize(name), name.to_string());
    }

    /// Resolves a raw header to a canonical field name.
    pub fn resolve(&self, header: &str) -> Option<&str> {
        self.keys.get(&normalize(header)).map(String::as_str)
    }

    /// Resolves an exact field name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.keys.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_case_and_whitespace_variants() {
        let schema = vec![
            SchemaField::new("Site Number"),
            SchemaField::new("STUDYID"),
        ];
        let lookup = SchemaLookup::from_schema(&schema);
        assert_eq!(lookup.resolve("  site number "), Some("Site Number"));
        assert_eq!(lookup.resolve("StudyId"), Some("STUDYID"));
        assert_eq!(lookup.resolve("Site_Number"), None);
    }

    #[test]
    fn later_field_wins_on_collision() {
        let schema = vec![SchemaField::new("visit"), SchemaField::new("Visit")];
        let lookup = SchemaLookup::from_schema(&schema);
        assert_eq!(lookup.resolve("VISIT"), Some("Visit"));
    }
}
