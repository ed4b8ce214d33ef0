//! Uniform row/header model produced by every input format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One data row keyed by header name.
///
/// When a table has duplicate header names, the value of the later column
/// wins, because rows are built by inserting cells in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record by pairing headers with values positionally.
    ///
    /// Missing trailing values become empty strings.
    pub fn from_pairs<H, V>(headers: &[H], values: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record = Self::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = values.get(idx).map(AsRef::as_ref).unwrap_or("");
            record.insert(header.as_ref(), value);
        }
        record
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Value stored under `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// True when the column is absent or holds an empty string.
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).is_none_or(str::is_empty)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Parsed input: ordered headers plus rows keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column headers in source order. Uniqueness is not enforced.
    pub headers: Vec<String>,
    /// Data rows, first data row first.
    pub rows: Vec<Record>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
