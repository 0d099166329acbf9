//! SQLite query source

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::model::RowSet;

use super::RowSource;

/// Runs the configured query against a SQLite database
pub struct SqliteSource;

impl RowSource for SqliteSource {
    fn fetch(&self, path: &Path, config: &Config) -> Result<RowSet> {
        let query = config
            .query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ExportError::Config("a query is required for database sources".into()))?;

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| ExportError::Query(format!("cannot open {}: {}", path.display(), e)))?;

        query_rows(&conn, query)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "db" | "sqlite" | "sqlite3")
    }
}

/// Run a query and buffer every row as text
pub fn query_rows(conn: &Connection, query: &str) -> Result<RowSet> {
    debug!(query, "preparing query");
    let mut stmt = conn
        .prepare(query)
        .map_err(|e| ExportError::Query(format!("prepare failed: {}", e)))?;

    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut set = RowSet::new(columns);

    let mut rows = stmt
        .query([])
        .map_err(|e| ExportError::Query(format!("query failed: {}", e)))?;

    let mut line = 0;
    while let Some(row) = rows
        .next()
        .map_err(|e| ExportError::Query(format!("row fetch failed after {} rows: {}", line, e)))?
    {
        line += 1;
        let mut values = Vec::with_capacity(set.column_count());
        for (idx, column) in set.columns.iter().enumerate() {
            let value = row
                .get_ref(idx)
                .map_err(|e| ExportError::Query(format!("row decode failed: {}", e)))?;
            values.push(value_to_text(value).ok_or_else(|| ExportError::UnsupportedValue {
                column: column.clone(),
                row: line,
            })?);
        }
        set.push_values(values);
    }

    Ok(set)
}

/// Render a SQLite value as text; `None` inside means SQL NULL
///
/// Returns `None` for values with no text form (non-UTF-8 text or blobs).
fn value_to_text(value: ValueRef<'_>) -> Option<Option<String>> {
    match value {
        ValueRef::Null => Some(None),
        ValueRef::Integer(i) => Some(Some(i.to_string())),
        ValueRef::Real(f) => Some(Some(f.to_string())),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => std::str::from_utf8(bytes)
            .ok()
            .map(|s| Some(s.to_string())),
    }
}
