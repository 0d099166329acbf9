//! Key/value extraction and dynamic header assignment

mod accumulator;
mod separator;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::model::{Row, RowSet, Sheet};

pub use accumulator::{header_label, KeyAccumulator};
pub use separator::Separator;

/// Counts describing an extraction, for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub rows: usize,
    pub fixed_columns: usize,
    /// Discovered keys per extraction column, in configured order
    pub keys_per_column: Vec<(String, usize)>,
}

impl ExtractStats {
    pub fn total_keys(&self) -> usize {
        self.keys_per_column.iter().map(|(_, n)| n).sum()
    }
}

/// Result of running both extraction passes
#[derive(Debug, Clone)]
pub struct Extraction {
    pub sheet: Sheet,
    pub keys: KeyAccumulator,
    pub stats: ExtractStats,
}

/// Two-pass extractor over a buffered row set
pub struct Extractor {
    columns: Vec<String>,
    separator: Separator,
}

impl Extractor {
    /// Create an extractor for the given extraction columns
    pub fn new(columns: Vec<String>, separator: Separator) -> Self {
        Self { columns, separator }
    }

    /// Create an extractor from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let separator = Separator::new(&config.separator, config.separator_mode)?;
        Ok(Self::new(config.extraction_columns.clone(), separator))
    }

    /// Run both passes and build the output sheet
    pub fn extract(&self, rows: &RowSet) -> Result<Extraction> {
        let positions = self.resolve_columns(rows)?;

        let keys = self.collect_keys(rows, &positions)?;
        let header = self.build_header(rows, &keys);
        debug!(columns = header.len(), "built header");

        let mut sheet = Sheet::new(header);
        for (idx, row) in rows.rows.iter().enumerate() {
            sheet
                .rows
                .push(self.fill_row(rows, &keys, &positions, row, idx + 1)?);
        }

        let stats = ExtractStats {
            rows: sheet.row_count(),
            fixed_columns: rows.column_count(),
            keys_per_column: keys
                .columns()
                .map(|(c, set)| (c.to_string(), set.len()))
                .collect(),
        };
        info!(
            rows = stats.rows,
            keys = stats.total_keys(),
            "extracted key/value columns"
        );

        Ok(Extraction { sheet, keys, stats })
    }

    /// Position of each extraction column; a repeated name resolves to its first column
    fn resolve_columns<'c>(&'c self, rows: &RowSet) -> Result<IndexMap<&'c str, usize>> {
        self.columns
            .iter()
            .map(|column| {
                rows.column_index(column)
                    .map(|idx| (column.as_str(), idx))
                    .ok_or_else(|| ExportError::ColumnNotFound {
                        column: column.clone(),
                        row: None,
                    })
            })
            .collect()
    }

    /// First pass: record every key under its column, in first-encounter order
    pub fn discover_keys(&self, rows: &RowSet) -> Result<KeyAccumulator> {
        let positions = self.resolve_columns(rows)?;
        self.collect_keys(rows, &positions)
    }

    fn collect_keys(
        &self,
        rows: &RowSet,
        positions: &IndexMap<&str, usize>,
    ) -> Result<KeyAccumulator> {
        let mut keys = KeyAccumulator::new(&self.columns);
        for (idx, row) in rows.rows.iter().enumerate() {
            for (&column, &position) in positions {
                let Some(text) = lookup(row, column, position, idx + 1)? else {
                    continue;
                };
                for (key, _) in self.separator.pairs(text) {
                    if keys.record(column, key) {
                        debug!(column, key, row = idx + 1, "discovered key");
                    }
                }
            }
        }
        Ok(keys)
    }

    /// Original columns followed by `column:key` for each discovered key
    pub fn build_header(&self, rows: &RowSet, keys: &KeyAccumulator) -> Vec<String> {
        let mut header = rows.columns.clone();
        header.extend(keys.header_labels());
        header
    }

    /// Second pass for a single row
    fn fill_row(
        &self,
        rows: &RowSet,
        keys: &KeyAccumulator,
        positions: &IndexMap<&str, usize>,
        row: &Row,
        line: usize,
    ) -> Result<Vec<Option<String>>> {
        let mut cells = Vec::with_capacity(rows.column_count() + keys.total_keys());
        for (position, column) in rows.columns.iter().enumerate() {
            cells.push(lookup(row, column, position, line)?.map(str::to_string));
        }

        for (column, column_keys) in keys.columns() {
            // last write wins for repeated keys
            let mut values: IndexMap<&str, &str> = IndexMap::new();
            if let Some(&position) = positions.get(column) {
                if let Some(text) = lookup(row, column, position, line)? {
                    values.extend(self.separator.pairs(text));
                }
            }
            cells.extend(
                column_keys
                    .iter()
                    .map(|key| values.get(key.as_str()).map(|v| v.to_string())),
            );
        }
        Ok(cells)
    }
}

/// Text at a column position in a row; a row too short to hold it is fatal
fn lookup<'r>(
    row: &'r Row,
    column: &str,
    position: usize,
    line: usize,
) -> Result<Option<&'r str>> {
    row.get(position).ok_or_else(|| ExportError::ColumnNotFound {
        column: column.to_string(),
        row: Some(line),
    })
}

/// Convenience function to run an extraction from configuration
pub fn extract_sheet(rows: &RowSet, config: &Config) -> Result<Extraction> {
    Extractor::from_config(config)?.extract(rows)
}
