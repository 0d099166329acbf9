//! Error types for the export pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching, extracting, or writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// Invalid or incomplete configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Separator could not be compiled as a regular expression
    #[error("Invalid separator pattern '{pattern}'")]
    InvalidSeparator {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No row source handles the given path
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// Opening, preparing, or iterating the row source failed
    #[error("Query failed: {0}")]
    Query(String),

    /// A source value could not be represented as text
    #[error("Unsupported value in column '{column}' at row {row}")]
    UnsupportedValue { column: String, row: usize },

    /// An extraction column is missing from the row set or from a row
    #[error("{}", column_not_found(.column, .row))]
    ColumnNotFound { column: String, row: Option<usize> },

    /// Output sink could not be written
    #[error("Failed to write output: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output formatter failed while rendering the sheet
    #[error("Failed to render sheet: {0}")]
    Render(String),
}

fn column_not_found(column: &str, row: &Option<usize>) -> String {
    match row {
        Some(row) => format!("Column not found: '{}' (row {})", column, row),
        None => format!("Column not found: '{}'", column),
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
