//! Spreadsheet source (xlsx, xls, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::warn;

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::model::RowSet;

use super::RowSource;

/// Reads the first (or configured input) sheet of a workbook; the first row is the header
pub struct ExcelSource;

impl RowSource for ExcelSource {
    fn fetch(&self, path: &Path, config: &Config) -> Result<RowSet> {
        if config.query.is_some() {
            warn!(source = %path.display(), "query is ignored for spreadsheet sources");
        }

        let mut workbook = open_workbook_auto(path)
            .map_err(|e| ExportError::Query(format!("cannot open {}: {}", path.display(), e)))?;

        let sheet_name = match config.input_sheet {
            Some(ref name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ExportError::Query("no sheets found in workbook".into()))?,
        };

        let range: Range<Data> = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ExportError::Query(format!("cannot read sheet {}: {}", sheet_name, e)))?;

        Ok(range_to_rows(&range))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "xlsx" | "xls" | "ods" | "xlsm")
    }
}

/// Convert a cell range into rows; an empty range gives an empty row set
pub fn range_to_rows(range: &Range<Data>) -> RowSet {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return RowSet::default();
    };
    let columns = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell_to_text(cell) {
            Some(name) => name,
            None => format!("Column{}", i + 1),
        })
        .collect();

    let mut set = RowSet::new(columns);
    for row in rows {
        set.push_values(row.iter().map(cell_to_text).collect());
    }
    set
}

fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => {
            warn!(error = ?e, "cell error read as text");
            Some(format!("#{:?}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_to_rows() {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("id".into()));
        range.set_value((0, 1), Data::String("acc".into()));
        range.set_value((1, 0), Data::String("007".into()));
        range.set_value((1, 1), Data::String("a-1".into()));
        range.set_value((2, 0), Data::Float(2.5));

        let set = range_to_rows(&range);
        assert_eq!(set.columns, vec!["id", "acc", "Column3"]);
        assert_eq!(set.value(0, "id"), Some(Some("007")));
        assert_eq!(set.value(1, "id"), Some(Some("2.5")));
        assert_eq!(set.value(1, "acc"), Some(None));
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        let set = range_to_rows(&range);
        assert_eq!(set.column_count(), 0);
        assert_eq!(set.row_count(), 0);
    }
}
