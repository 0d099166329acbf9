//! XLSX output format

use std::io::Write;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::{ExportError, Result};
use crate::model::Sheet;

use super::SheetWriter;

/// Worksheet name used when none is configured
pub const DEFAULT_SHEET_NAME: &str = "export";

/// XLSX output: bold header row, every value written as a string
pub struct XlsxOutput {
    sheet_name: String,
}

impl XlsxOutput {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// Build the workbook bytes in memory
    pub fn to_bytes(&self, sheet: &Sheet) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name).map_err(xlsx_err)?;

        let header_format = Format::new().set_bold();
        for (col, header) in sheet.header.iter().enumerate() {
            let (row, col) = cell_position(0, col)?;
            worksheet
                .write_string_with_format(row, col, header, &header_format)
                .map_err(xlsx_err)?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                // blank cells are left unwritten; values stay text, never numbers
                if let Some(value) = cell {
                    let (row, col) = cell_position(row_idx + 1, col_idx)?;
                    worksheet.write_string(row, col, value).map_err(xlsx_err)?;
                }
            }
        }

        worksheet.autofit();
        workbook.save_to_buffer().map_err(xlsx_err)
    }
}

/// Worksheet coordinates for a sheet position; out-of-range positions are an error
fn cell_position(row: usize, col: usize) -> Result<(u32, u16)> {
    let out_of_range =
        || ExportError::Render(format!("cell ({}, {}) is outside the worksheet", row, col));
    let excel_row = u32::try_from(row).map_err(|_| out_of_range())?;
    let excel_col = u16::try_from(col).map_err(|_| out_of_range())?;
    Ok((excel_row, excel_col))
}

fn xlsx_err(e: XlsxError) -> ExportError {
    ExportError::Render(e.to_string())
}

impl Default for XlsxOutput {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_NAME)
    }
}

impl SheetWriter for XlsxOutput {
    fn render(&self, sheet: &Sheet, writer: &mut dyn Write) -> Result<()> {
        let bytes = self.to_bytes(sheet)?;
        writer
            .write_all(&bytes)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        Ok(())
    }
}
