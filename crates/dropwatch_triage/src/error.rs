//! Error types for triage runs
//!
//! "No file found" is not an error: it is reported as
//! [`TriageOutcome::NoFile`](crate::report::TriageOutcome::NoFile).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Triage error type
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Watch directory unavailable: {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported or corrupt file: {}: {reason}", path.display())]
    UnsupportedOrCorruptFile { path: PathBuf, reason: String },

    #[error("Failed to write artifact: {}: {source}", path.display())]
    ArtifactWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl TriageError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TriageError::UnsupportedOrCorruptFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn artifact_write(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        TriageError::ArtifactWriteFailure {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Path of the directory or file the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            TriageError::DirectoryUnavailable { path, .. }
            | TriageError::UnsupportedOrCorruptFile { path, .. }
            | TriageError::ArtifactWriteFailure { path, .. } => Some(path),
            TriageError::Config(_) | TriageError::Io(_) => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TriageError>;
