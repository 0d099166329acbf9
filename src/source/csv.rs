//! Delimited text file source

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::warn;

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::model::RowSet;

use super::RowSource;

/// Reads a headered CSV or TSV file; cells are kept verbatim as text
pub struct CsvSource;

impl RowSource for CsvSource {
    fn fetch(&self, path: &Path, config: &Config) -> Result<RowSet> {
        if config.query.is_some() {
            warn!(source = %path.display(), "query is ignored for delimited file sources");
        }

        let file = File::open(path)
            .map_err(|e| ExportError::Query(format!("cannot open {}: {}", path.display(), e)))?;
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
            _ => b',',
        };

        read_rows(BufReader::new(file), delimiter)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

/// Read delimited rows from any reader
pub fn read_rows<R: std::io::Read>(reader: R, delimiter: u8) -> Result<RowSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ExportError::Query(format!("failed to read headers: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut set = RowSet::new(headers);

    for (line_num, result) in csv_reader.records().enumerate() {
        // +2 for 1-indexing and header
        let record = result
            .map_err(|e| ExportError::Query(format!("failed to read row {}: {}", line_num + 2, e)))?;

        set.push_values(
            record
                .iter()
                .map(|s| (!s.is_empty()).then(|| s.to_string()))
                .collect(),
        );
    }

    Ok(set)
}
