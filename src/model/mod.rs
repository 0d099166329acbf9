//! Data model for rows read from a source and the sheet written out

mod sheet;
mod table;

pub use sheet::Sheet;
pub use table::{Row, RowSet};
