//! kvsheet - export query results to a spreadsheet
//!
//! Rows are read from a SQLite query (or a CSV/Excel file), key/value pairs
//! embedded in chosen text columns are split into `column:key` headers in
//! first-seen order, and the result is written as XLSX, CSV, or JSON.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod logging;
pub mod model;
pub mod output;
pub mod source;

pub use config::Config;
pub use error::ExportError;
pub use export::{run_export, ExportOutcome};
pub use extract::{Extractor, KeyAccumulator, Separator};
pub use model::{Row, RowSet, Sheet};
