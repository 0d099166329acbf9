//! Rows and row sets as read from a source

/// A row: nullable text values by column position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<Option<String>>,
}

impl Row {
    /// Create a row from values in column order
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Value at a column position; `None` if the row has no such position
    pub fn get(&self, index: usize) -> Option<Option<&str>> {
        self.values.get(index).map(|v| v.as_deref())
    }

    /// Number of values in this row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Option<String>>> for Row {
    fn from(values: Vec<Option<String>>) -> Self {
        Self::new(values)
    }
}

/// All rows fetched from a source, buffered so they can be read twice
///
/// Column names may repeat (e.g. `a.id, b.id` in a join); values are kept
/// by position so neither is lost.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    /// Column names in source order
    pub columns: Vec<String>,
    /// Rows in source order
    pub rows: Vec<Row>,
}

impl RowSet {
    /// Create an empty row set with column names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row built from values in column order
    ///
    /// Missing trailing values are padded with nulls; extra values are dropped.
    pub fn push_values(&mut self, mut values: Vec<Option<String>>) {
        values.resize(self.columns.len(), None);
        self.rows.push(Row::new(values));
    }

    /// Add a pre-built row as is
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the index of the first column with this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Keyed lookup: value of the first column named `column` in row `row`
    pub fn value(&self, row: usize, column: &str) -> Option<Option<&str>> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
