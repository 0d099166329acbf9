//! Row sources: databases and tabular files

mod csv;
mod excel;
mod sqlite;

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::model::RowSet;

pub use self::csv::CsvSource;
pub use self::excel::ExcelSource;
pub use self::sqlite::SqliteSource;

/// Something that yields rows of named text columns
pub trait RowSource {
    /// Read every row into memory, running `query` where the source supports one
    fn fetch(&self, path: &Path, config: &Config) -> Result<RowSet>;

    /// Check if this source can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Picks a row source based on file extension
pub struct SourceFactory {
    sources: Vec<Box<dyn RowSource>>,
}

impl Default for SourceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFactory {
    /// Create a factory with all supported sources
    pub fn new() -> Self {
        Self {
            sources: vec![
                Box::new(SqliteSource),
                Box::new(CsvSource),
                Box::new(ExcelSource),
            ],
        }
    }

    /// Get a source for the given path
    pub fn get_source(&self, path: &Path) -> Result<&dyn RowSource> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        self.sources
            .iter()
            .find(|s| s.supports_extension(&ext))
            .map(|s| s.as_ref())
            .ok_or_else(|| {
                ExportError::UnsupportedSource(format!(
                    "no reader for '{}' files ({})",
                    if ext.is_empty() { "unknown" } else { ext.as_str() },
                    path.display()
                ))
            })
    }

    /// Fetch rows using the appropriate source
    pub fn fetch(&self, path: &Path, config: &Config) -> Result<RowSet> {
        let rows = self.get_source(path)?.fetch(path, config)?;
        info!(
            source = %path.display(),
            rows = rows.row_count(),
            columns = rows.column_count(),
            "fetched rows"
        );
        Ok(rows)
    }
}
