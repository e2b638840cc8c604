//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use dropwatch_triage::TriageError;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    /// Watched directory is missing or not a directory
    pub fn watch_dir_unavailable(path: &Path) -> Self {
        Self::new(format!("Watch directory unavailable: {}", path.display()))
            .with_context("Dropwatch polls this directory for new CSV/XLSX reports")
            .with_suggestions([
                format!("TRY: Create it: mkdir -p {}", path.display()),
                "TRY: Point at another folder with --watch-dir DIR".to_string(),
                "TRY: Set [triage] watch_dir in the file passed to --config".to_string(),
            ])
    }

    /// Config file could not be read or parsed
    pub fn config_unreadable(path: &Path, cause: &anyhow::Error) -> Self {
        Self::new(format!("Cannot load config: {}", path.display()))
            .with_context(format!("{:#}", cause))
            .with_suggestions([
                format!("TRY: Check the file exists: ls -la {}", path.display()),
                "TRY: Validate the TOML syntax ([triage], [notify], poll_interval_secs)".to_string(),
                "TRY: Omit --config to run with built-in defaults".to_string(),
            ])
    }

    /// File given to `inspect` does not exist
    pub fn file_not_found(path: &Path) -> Self {
        Self::new(format!("File not found: {}", path.display()))
            .with_context("The specified file does not exist")
            .with_suggestions([
                format!("TRY: Check if the file exists: ls -la {}", path.display()),
                format!(
                    "TRY: Look for similar files: ls {}",
                    path.parent()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| ".".to_string())
                ),
            ])
    }

    /// File could not be parsed as a table
    pub fn unreadable_report(path: &Path, reason: &str) -> Self {
        Self::new(format!("Cannot read report: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestions([
                "TRY: Supported formats are .csv and .xlsx".to_string(),
                "TRY: Check that every row has no more fields than the header".to_string(),
                format!("TRY: Inspect the raw file: head -n 20 {}", path.display()),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Rewrite triage failures the operator can fix into a [`HelpfulError`].
/// Anything else comes back unchanged.
pub fn explain(err: anyhow::Error) -> anyhow::Error {
    let helpful = match err.downcast_ref::<TriageError>() {
        Some(TriageError::DirectoryUnavailable { path, source }) => {
            HelpfulError::watch_dir_unavailable(path).with_context(source.to_string())
        }
        Some(TriageError::UnsupportedOrCorruptFile { path, reason }) => {
            HelpfulError::unreadable_report(path, reason)
        }
        _ => return err,
    };
    helpful.into()
}
