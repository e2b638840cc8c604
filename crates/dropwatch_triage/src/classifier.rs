//! Quality classification of a loaded dataset

use crate::dataset::Dataset;
use crate::types::QualityStatus;
use serde::Serialize;

/// Null count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnNulls {
    pub column: String,
    pub nulls: usize,
}

/// Status plus the statistics it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    pub status: QualityStatus,
    pub total_records: usize,
    pub rows_with_nulls: usize,
    pub null_counts: Vec<ColumnNulls>,
}

impl QualityAssessment {
    /// `(status, total_records)`
    pub fn summary(&self) -> (QualityStatus, usize) {
        (self.status, self.total_records)
    }

    /// Columns with at least one null, in header order.
    pub fn columns_with_nulls(&self) -> impl Iterator<Item = &ColumnNulls> {
        self.null_counts.iter().filter(|c| c.nulls > 0)
    }
}

/// Classify a dataset. Pure and total: exactly one status is returned.
pub fn classify(dataset: &Dataset) -> QualityAssessment {
    let total_records = dataset.len();
    let mut null_counts: Vec<ColumnNulls> = dataset
        .columns()
        .iter()
        .map(|name| ColumnNulls {
            column: name.clone(),
            nulls: 0,
        })
        .collect();

    let mut rows_with_nulls = 0;
    let mut all_null = true;
    for row in dataset.rows() {
        if row.has_null() {
            rows_with_nulls += 1;
        }
        if !row.is_all_null() {
            all_null = false;
        }
        for (idx, cell) in row.cells().iter().enumerate() {
            if cell.is_none() {
                null_counts[idx].nulls += 1;
            }
        }
    }

    let status = if total_records == 0 || all_null {
        QualityStatus::Empty
    } else if rows_with_nulls > 0 {
        QualityStatus::Partial
    } else {
        QualityStatus::Complete
    };

    QualityAssessment {
        status,
        total_records,
        rows_with_nulls,
        null_counts,
    }
}
