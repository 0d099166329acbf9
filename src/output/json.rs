//! JSON output format

use std::io::Write;

use crate::error::{ExportError, Result};
use crate::model::Sheet;

use super::SheetWriter;

/// JSON output: `{"header": [...], "rows": [[...]]}` with `null` for blanks
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetWriter for JsonOutput {
    fn render(&self, sheet: &Sheet, writer: &mut dyn Write) -> Result<()> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, sheet)
        } else {
            serde_json::to_writer(&mut *writer, sheet)
        };
        result.map_err(|e| ExportError::Render(e.to_string()))?;
        writeln!(writer).map_err(|e| ExportError::Render(e.to_string()))?;
        Ok(())
    }
}
