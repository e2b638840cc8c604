//! Core types shared across the triage pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A directory entry eligible for triage.
///
/// Discovered fresh on every run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFile {
    pub name: String,
    pub path: PathBuf,
    pub modified_at: DateTime<Utc>,
}

impl CandidateFile {
    /// File name without its final extension.
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }
}

/// File name without its final extension (`report.v2.csv` -> `report.v2`).
pub fn base_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

/// Data quality of a loaded file.
///
/// Precedence is EMPTY, then PARTIAL, then COMPLETE: first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityStatus {
    /// Zero rows, or every cell null
    Empty,
    /// Some row has at least one null cell
    Partial,
    /// No row has a null cell
    Complete,
}

impl QualityStatus {
    pub const ALL: [QualityStatus; 3] = [
        QualityStatus::Empty,
        QualityStatus::Partial,
        QualityStatus::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityStatus::Empty => "EMPTY",
            QualityStatus::Partial => "PARTIAL",
            QualityStatus::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tabular encodings the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    pub fn from_extension(ext: &str, case_insensitive: bool) -> Option<Self> {
        let ext = if case_insensitive {
            ext.to_ascii_lowercase()
        } else {
            ext.to_string()
        };
        match ext.as_str() {
            "csv" => Some(TableFormat::Csv),
            "xlsx" => Some(TableFormat::Xlsx),
            _ => None,
        }
    }

    pub fn from_path(path: &Path, case_insensitive: bool) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| Self::from_extension(e, case_insensitive))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Xlsx => "xlsx",
        }
    }
}
