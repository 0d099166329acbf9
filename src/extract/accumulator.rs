//! Per-column discovered keys

use indexmap::{IndexMap, IndexSet};

/// Keys discovered for each extraction column, in first-encounter order
#[derive(Debug, Clone, Default)]
pub struct KeyAccumulator {
    keys: IndexMap<String, IndexSet<String>>,
}

impl KeyAccumulator {
    /// Create an accumulator with one empty key set per extraction column
    pub fn new(columns: &[String]) -> Self {
        Self {
            keys: columns
                .iter()
                .map(|c| (c.clone(), IndexSet::new()))
                .collect(),
        }
    }

    /// Record a key under its column; returns true if it was new
    pub fn record(&mut self, column: &str, key: &str) -> bool {
        match self.keys.get_mut(column) {
            Some(set) if !set.contains(key) => set.insert(key.to_string()),
            _ => false,
        }
    }

    /// Keys for one column
    pub fn keys(&self, column: &str) -> impl Iterator<Item = &str> {
        self.keys
            .get(column)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Extraction columns with their keys, in configured order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.keys.iter().map(|(c, set)| (c.as_str(), set))
    }

    /// Total discovered keys across all columns
    pub fn total_keys(&self) -> usize {
        self.keys.values().map(IndexSet::len).sum()
    }

    /// Header labels for discovered keys: `column:key`
    pub fn header_labels(&self) -> Vec<String> {
        self.columns()
            .flat_map(|(column, keys)| keys.iter().map(move |key| header_label(column, key)))
            .collect()
    }
}

/// Header label for a discovered key
pub fn header_label(column: &str, key: &str) -> String {
    format!("{}:{}", column, key)
}
