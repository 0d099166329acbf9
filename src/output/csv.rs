//! CSV output format

use std::io::Write;

use crate::error::{ExportError, Result};
use crate::model::Sheet;

use super::SheetWriter;

/// CSV output; blank cells become empty fields
pub struct CsvOutput {
    delimiter: u8,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetWriter for CsvOutput {
    fn render(&self, sheet: &Sheet, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);

        let render_err = |e: csv::Error| ExportError::Render(e.to_string());

        csv_writer.write_record(&sheet.header).map_err(render_err)?;
        for row in &sheet.rows {
            csv_writer
                .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))
                .map_err(render_err)?;
        }
        csv_writer
            .flush()
            .map_err(|e| ExportError::Render(e.to_string()))?;
        Ok(())
    }
}
