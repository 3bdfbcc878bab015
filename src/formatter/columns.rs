//! Column set discovery for CSV output

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Ordered column names used as the CSV header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    names: Vec<String>,
}

impl ColumnSet {
    /// Use the caller's list as given, order and all
    pub fn explicit(fields: &[String]) -> Self {
        Self {
            names: fields.to_vec(),
        }
    }

    /// Collect keys across records in first-seen order, dropping duplicates
    pub fn discover<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Map<String, Value>>,
    {
        let mut seen = HashSet::new();
        let mut names = Vec::new();

        for record in records {
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    names.push(key.clone());
                }
            }
        }

        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
