//! Load CSV and XLSX reports into a [`Dataset`]
//!
//! Null detection follows the conventions of common dataframe readers: an
//! empty field, or a field that exactly matches one of the null markers, is
//! null. Matching is exact (no trimming, case-sensitive).

use crate::dataset::{Dataset, Row};
use crate::error::{Result, TriageError};
use crate::types::TableFormat;
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Markers treated as null when they make up an entire cell.
pub const DEFAULT_NULL_MARKERS: &[&str] = &[
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

/// Options controlling how a file is read.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub null_markers: Vec<String>,
    pub case_insensitive_extensions: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| s.to_string()).collect(),
            case_insensitive_extensions: false,
        }
    }
}

impl LoadOptions {
    fn cell(&self, raw: &str) -> Option<String> {
        if raw.is_empty() || self.null_markers.iter().any(|m| m == raw) {
            None
        } else {
            Some(raw.to_string())
        }
    }
}

/// Load a file, choosing the reader from its extension.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let format = TableFormat::from_path(path, options.case_insensitive_extensions)
        .ok_or_else(|| TriageError::corrupt(path, "unsupported file extension"))?;

    let dataset = match format {
        TableFormat::Csv => {
            let file = File::open(path).map_err(|e| TriageError::corrupt(path, e.to_string()))?;
            read_csv(path, BufReader::new(file), options)?
        }
        TableFormat::Xlsx => read_xlsx(path, options)?,
    };

    debug!(
        path = %path.display(),
        columns = dataset.columns().len(),
        rows = dataset.len(),
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Parse CSV text. `path` is only used for error context.
pub fn read_csv<R: Read>(path: &Path, reader: R, options: &LoadOptions) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = rdr.records();
    let header = match records.next() {
        // Zero-byte file: no columns, no rows
        None => return Ok(Dataset::default()),
        Some(result) => result.map_err(|e| TriageError::corrupt(path, e.to_string()))?,
    };
    let columns: Vec<String> = header.iter().map(|s| s.to_string()).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    for result in records {
        let record = result.map_err(|e| TriageError::corrupt(path, e.to_string()))?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(TriageError::corrupt(
                path,
                format!(
                    "line {}: expected {} fields, saw {}",
                    line,
                    width,
                    record.len()
                ),
            ));
        }
        rows.push(record.iter().map(|raw| options.cell(raw)).collect::<Row>());
    }

    Ok(Dataset::new(columns, rows))
}

fn read_xlsx(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| TriageError::corrupt(path, format!("{e}")))?;

    let range = match workbook.worksheet_range_at(0) {
        None => return Ok(Dataset::default()),
        Some(result) => result.map_err(|e| TriageError::corrupt(path, format!("{e}")))?,
    };

    let mut sheet_rows = range.rows();
    let columns: Vec<String> = match sheet_rows.next() {
        None => return Ok(Dataset::default()),
        Some(header) => header.iter().map(|c| c.to_string()).collect(),
    };

    let rows = sheet_rows
        .map(|cells| {
            cells
                .iter()
                .map(|c| match c {
                    Data::Empty => None,
                    other => options.cell(&other.to_string()),
                })
                .collect::<Row>()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}
