//! kvsheet - export query results with key/value columns split into headers

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};

use kvsheet::config::{Config, OutputFormat, SeparatorMode};
use kvsheet::export::run_export;
use kvsheet::logging::init_logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Xlsx,
    Csv,
    Tsv,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Xlsx => OutputFormat::Xlsx,
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Tsv => OutputFormat::Tsv,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Export query results to a spreadsheet, splitting key/value text columns into headers
#[derive(Parser, Debug)]
#[command(name = "kvsheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database (.db, .sqlite) or file (.csv, .tsv, .xlsx) to read rows from
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// SQL query to run against a database source
    #[arg(short, long)]
    query: Option<String>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Column(s) holding key/value text (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    extract: Vec<String>,

    /// Separator between keys and values (a regex unless --literal)
    #[arg(long)]
    separator: Option<String>,

    /// Match the separator as an exact string
    #[arg(long)]
    literal: bool,

    /// Output format (defaults to the output file extension, then xlsx)
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Sheet name to write in xlsx output
    #[arg(long)]
    sheet: Option<String>,

    /// Sheet to read from a spreadsheet source (defaults to the first)
    #[arg(long)]
    input_sheet: Option<String>,

    /// Print the first N rows instead of writing a file
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(cli)?;

    let mut stdout = std::io::stdout();
    let outcome = run_export(&config, &mut stdout).with_context(|| {
        format!(
            "Export from {} failed",
            config
                .source
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    eprintln!("Exported {}", outcome);
    Ok(())
}

/// Merge the optional config file with command-line flags
fn build_config(cli: Cli) -> Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };

    if cli.source.is_some() {
        config.source = cli.source;
    }
    if cli.query.is_some() {
        config.query = cli.query;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }
    if !cli.extract.is_empty() {
        config.extraction_columns = cli.extract;
    }
    if let Some(separator) = cli.separator {
        config.separator = separator;
    }
    if cli.literal {
        config.separator_mode = SeparatorMode::Literal;
    }
    if let Some(format) = cli.format {
        config.format = Some(format.into());
    }
    if cli.sheet.is_some() {
        config.sheet_name = cli.sheet;
    }
    if cli.input_sheet.is_some() {
        config.input_sheet = cli.input_sheet;
    }
    config.preview = cli.preview;

    config.validate().context("Invalid arguments")?;
    Ok(config)
}
