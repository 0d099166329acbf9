//! Configuration handling for kvsheet

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ExportError, Result};

/// Default separator between keys and values
pub const DEFAULT_SEPARATOR: &str = "-";

/// Output format for the exported sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    /// CSV writer with tab delimiters
    Tsv,
    Json,
}

impl OutputFormat {
    /// Infer the format from an output path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// How the separator text is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorMode {
    /// Regular expression (hyphens inside values also split)
    #[default]
    Regex,
    /// Exact string match
    Literal,
}

/// Configuration for an export run
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database or file to read rows from
    pub source: Option<PathBuf>,
    /// SQL text run against database sources
    pub query: Option<String>,
    /// Output target path
    pub output: Option<PathBuf>,
    /// Columns whose text holds key/value pairs
    pub extraction_columns: Vec<String>,
    /// Separator between alternating keys and values
    pub separator: String,
    /// Separator interpretation
    pub separator_mode: SeparatorMode,
    /// Output format; inferred from the output extension when unset
    pub format: Option<OutputFormat>,
    /// Output sheet name for xlsx output
    pub sheet_name: Option<String>,
    /// Sheet to read from spreadsheet sources; the first sheet when unset
    pub input_sheet: Option<String>,
    /// Print this many rows instead of writing the output
    #[serde(skip)]
    pub preview: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            query: None,
            output: None,
            extraction_columns: Vec::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
            separator_mode: SeparatorMode::default(),
            format: None,
            sheet_name: None,
            input_sheet: None,
            preview: None,
        }
    }
}

impl Config {
    /// Create a new Config reading from `source` and writing to `output`
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            output: Some(output.into()),
            ..Default::default()
        }
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ExportError::Config(e.to_string()))
    }

    /// Set the SQL query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set extraction columns
    pub fn with_extraction_columns(mut self, columns: Vec<String>) -> Self {
        self.extraction_columns = columns;
        self
    }

    /// Set the separator and how to interpret it
    pub fn with_separator(mut self, separator: impl Into<String>, mode: SeparatorMode) -> Self {
        self.separator = separator.into();
        self.separator_mode = mode;
        self
    }

    /// Set output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set output sheet name
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Set the sheet read from spreadsheet sources
    pub fn with_input_sheet(mut self, name: impl Into<String>) -> Self {
        self.input_sheet = Some(name.into());
        self
    }

    /// Preview rows instead of writing output
    pub fn with_preview(mut self, rows: usize) -> Self {
        self.preview = Some(rows);
        self
    }

    /// Output format, falling back to the output extension and then xlsx
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or_default()
    }

    /// Check that the configuration describes a runnable export
    pub fn validate(&self) -> Result<()> {
        if self.source.is_none() {
            return Err(ExportError::Config("a source is required".into()));
        }
        if self.output.is_none() && self.preview.is_none() {
            return Err(ExportError::Config(
                "an output path is required unless previewing".into(),
            ));
        }
        if self.separator.is_empty() {
            return Err(ExportError::Config("separator must not be empty".into()));
        }
        Ok(())
    }
}
