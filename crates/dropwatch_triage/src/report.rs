//! Immutable run results handed to notification and scheduling collaborators

use crate::router::{Stage, NO_FILE_STAGES};
use crate::types::QualityStatus;
use serde::Serialize;
use std::path::PathBuf;

/// Result of triaging one file. Built once by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageReport {
    pub file: String,
    /// Rows eligible for the next stage (the clean count for PARTIAL files)
    pub total_records: usize,
    pub status: QualityStatus,
    pub training_path: Option<PathBuf>,
    pub revised_path: Option<PathBuf>,
    pub next_stages: Vec<Stage>,
}

/// Status of a run that found no candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NoFileStatus {
    #[default]
    #[serde(rename = "NONE")]
    None,
}

/// Result of a run that found nothing to triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoFileReport {
    pub directory: PathBuf,
    pub status: NoFileStatus,
    pub next_stages: Vec<Stage>,
}

impl NoFileReport {
    pub const STATUS: &'static str = "NONE";

    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            status: NoFileStatus::None,
            next_stages: NO_FILE_STAGES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TriageOutcome {
    NoFile(NoFileReport),
    Triaged(TriageReport),
}

impl TriageOutcome {
    pub fn next_stages(&self) -> &[Stage] {
        match self {
            TriageOutcome::NoFile(r) => &r.next_stages,
            TriageOutcome::Triaged(r) => &r.next_stages,
        }
    }

    /// `NONE`, `EMPTY`, `PARTIAL` or `COMPLETE`
    pub fn status_label(&self) -> &'static str {
        match self {
            TriageOutcome::NoFile(_) => NoFileReport::STATUS,
            TriageOutcome::Triaged(r) => r.status.as_str(),
        }
    }

    pub fn report(&self) -> Option<&TriageReport> {
        match self {
            TriageOutcome::NoFile(_) => None,
            TriageOutcome::Triaged(r) => Some(r),
        }
    }
}
