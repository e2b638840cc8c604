//! In-memory tabular data
//!
//! A [`Dataset`] owns its header and rows. Every row carries exactly one cell
//! per column; a cell is `None` when the source value was missing.

use std::io::Write;

/// One record: cells aligned with [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<Option<String>>,
}

impl Row {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.cells.get(idx).and_then(|c| c.as_deref())
    }

    pub fn has_null(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// True when every cell is null. A row with no cells counts as all-null.
    pub fn is_all_null(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn null_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

impl<S: Into<String>> FromIterator<Option<S>> for Row {
    fn from_iter<I: IntoIterator<Item = Option<S>>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(|c| c.map(Into::into)).collect())
    }
}

/// Ordered rows sharing one column set. Read-only after load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, padding short rows with nulls and truncating long ones
    /// so every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.cells.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Same columns, different rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self::new(self.columns.clone(), rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the dataset as CSV: header first, null cells as empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::WriterBuilder::new().flexible(false).from_writer(writer);
        if !self.columns.is_empty() {
            wtr.write_record(&self.columns)?;
        }
        for row in &self.rows {
            wtr.write_record(row.cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
