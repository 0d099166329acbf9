//! End-to-end export: fetch rows, extract key/value columns, write the sheet

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::{ExportError, Result};
use crate::extract::{ExtractStats, Extractor};
use crate::output::{render_preview, write_to_path, OutputFactory};
use crate::source::SourceFactory;

/// What an export run produced
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub stats: ExtractStats,
    /// Path written, or `None` when only previewed
    pub output: Option<PathBuf>,
}

impl std::fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows, {} fixed columns",
            self.stats.rows, self.stats.fixed_columns
        )?;
        for (column, keys) in &self.stats.keys_per_column {
            write!(f, ", {}: {} keys", column, keys)?;
        }
        if let Some(ref path) = self.output {
            write!(f, " -> {}", path.display())?;
        }
        Ok(())
    }
}

/// Run a full export
///
/// Every row is fetched and the whole sheet built before anything is written,
/// so a source or extraction failure leaves no output behind. In preview mode
/// the table goes to `preview_out` and no file is written.
pub fn run_export(config: &Config, preview_out: &mut dyn Write) -> Result<ExportOutcome> {
    config.validate()?;
    let source = config
        .source
        .as_deref()
        .ok_or_else(|| ExportError::Config("a source is required".into()))?;

    // build the separator before touching the source
    let extractor = Extractor::from_config(config)?;

    let rows = SourceFactory::new().fetch(source, config)?;
    let extraction = extractor.extract(&rows)?;

    if let Some(limit) = config.preview {
        render_preview(&extraction.sheet, limit, preview_out)?;
        return Ok(ExportOutcome {
            stats: extraction.stats,
            output: None,
        });
    }

    let output = config
        .output
        .as_deref()
        .ok_or_else(|| ExportError::Config("an output path is required".into()))?;
    let writer = OutputFactory::from_config(config);
    write_to_path(&extraction.sheet, output, writer.as_ref())?;
    info!(format = ?config.output_format(), "export complete");

    Ok(ExportOutcome {
        stats: extraction.stats,
        output: Some(output.to_path_buf()),
    })
}
