//! Status → next-stage routing
//!
//! The table is the whole state machine: each run is single-shot and the
//! returned stages are advisory fan-out for an external scheduler.

use crate::types::QualityStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named downstream step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Re-poll the drop folder; no forward progress
    Watchdog,
    /// Notify the stakeholder of the verdict
    Classifier,
    /// Hand the training subset to preprocessing
    Preprocessing,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Watchdog => "watchdog",
            Stage::Classifier => "classifier",
            Stage::Preprocessing => "preprocessing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watchdog" => Ok(Stage::Watchdog),
            "classifier" => Ok(Stage::Classifier),
            "preprocessing" => Ok(Stage::Preprocessing),
            other => Err(format!("unknown stage: {other}")),
        }
    }
}

const FORWARD: &[Stage] = &[Stage::Classifier, Stage::Preprocessing];

/// Stages for a run that found no candidate file.
pub const NO_FILE_STAGES: &[Stage] = &[Stage::Watchdog];

/// Next stages for a status.
pub fn route(status: QualityStatus) -> &'static [Stage] {
    match status {
        QualityStatus::Empty => &[Stage::Watchdog],
        QualityStatus::Partial => FORWARD,
        QualityStatus::Complete => FORWARD,
    }
}
