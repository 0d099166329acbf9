//! Output formatting and atomic file writing for exported sheets

mod csv;
mod json;
mod preview;
mod xlsx;

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{Config, OutputFormat};
use crate::error::{ExportError, Result};
use crate::model::Sheet;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::preview::render_preview;
pub use self::xlsx::{XlsxOutput, DEFAULT_SHEET_NAME};

/// Trait for sheet writers
pub trait SheetWriter {
    /// Render the whole sheet to a writer
    fn render(&self, sheet: &Sheet, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating sheet writers
pub struct OutputFactory;

impl OutputFactory {
    /// Create a writer for the given format
    pub fn create(format: OutputFormat, sheet_name: Option<&str>) -> Box<dyn SheetWriter> {
        match format {
            OutputFormat::Xlsx => Box::new(XlsxOutput::new(
                sheet_name.unwrap_or(DEFAULT_SHEET_NAME),
            )),
            OutputFormat::Csv => Box::new(CsvOutput::new()),
            OutputFormat::Tsv => Box::new(CsvOutput::with_delimiter(b'\t')),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }

    /// Create the writer described by a configuration
    pub fn from_config(config: &Config) -> Box<dyn SheetWriter> {
        Self::create(config.output_format(), config.sheet_name.as_deref())
    }
}

/// Render the sheet in memory, then atomically replace `path` with it
///
/// The bytes go to a temporary file beside the target that is renamed into
/// place, so a failed write never leaves a partial file at `path`.
pub fn write_to_path(sheet: &Sheet, path: &Path, writer: &dyn SheetWriter) -> Result<()> {
    let mut buffer = Vec::new();
    writer.render(sheet, &mut buffer)?;
    debug!(bytes = buffer.len(), "rendered sheet");

    let write_err = |source: std::io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(&buffer).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!(
        output = %path.display(),
        rows = sheet.row_count(),
        columns = sheet.column_count(),
        "wrote sheet"
    );
    Ok(())
}
