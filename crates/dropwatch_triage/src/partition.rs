//! Split a dataset into training-eligible and needs-review rows

use crate::dataset::{Dataset, Row};

/// Two disjoint subsets that together hold every source row.
///
/// Relative order within each subset matches the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPartition {
    /// Rows with no null cell
    pub clean: Dataset,
    /// Rows with at least one null cell, or no cells
    pub revised: Dataset,
}

impl RowPartition {
    pub fn total(&self) -> usize {
        self.clean.len() + self.revised.len()
    }
}

/// Stable partition on "has a null cell", with the classifier's null rule:
/// a row with no cells at all counts as all-null and goes to `revised`.
///
/// Meant for `PARTIAL` datasets but total over any input: a complete dataset
/// yields `revised = []`, an empty one yields `clean = []`.
pub fn partition(dataset: &Dataset) -> RowPartition {
    let (revised, clean): (Vec<Row>, Vec<Row>) = dataset
        .rows()
        .iter()
        .cloned()
        .partition(|row| row.has_null() || row.is_all_null());

    RowPartition {
        clean: dataset.with_rows(clean),
        revised: dataset.with_rows(revised),
    }
}
