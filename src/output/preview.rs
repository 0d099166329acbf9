//! Terminal preview of a sheet

use std::io::Write;

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::error::{ExportError, Result};
use crate::model::Sheet;

/// Print the header and up to `limit` rows as a table
pub fn render_preview(sheet: &Sheet, limit: usize, writer: &mut dyn Write) -> Result<()> {
    let io_err = |e: std::io::Error| ExportError::Render(e.to_string());

    if sheet.header.is_empty() {
        writeln!(writer, "(no columns)").map_err(io_err)?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(sheet.header.iter().cloned());
    for row in sheet.rows.iter().take(limit) {
        builder.push_record(row.iter().map(|cell| cell.clone().unwrap_or_default()));
    }

    let mut table = builder.build();
    table.with(Style::modern());
    writeln!(writer, "{}", table).map_err(io_err)?;

    if sheet.row_count() > limit {
        writeln!(writer, "... {} more rows", sheet.row_count() - limit).map_err(io_err)?;
    }
    Ok(())
}
