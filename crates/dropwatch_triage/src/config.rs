//! Configuration for triage runs

use crate::artifacts::ArtifactWriter;
use crate::loader::{LoadOptions, DEFAULT_NULL_MARKERS};
use crate::selector::ExtensionFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Triage configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Drop folder to watch
    #[serde(default = "default_watch_dir")]
    pub watch_dir: PathBuf,

    /// Root for null-free subsets
    #[serde(default = "default_training_dir")]
    pub training_dir: PathBuf,

    /// Root for subsets that need revisiting
    #[serde(default = "default_revised_dir")]
    pub revised_dir: PathBuf,

    /// Supported extensions, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Match `.CSV` as well as `.csv`
    #[serde(default)]
    pub case_insensitive_extensions: bool,

    /// Cell values read as null
    #[serde(default = "default_null_markers")]
    pub null_markers: Vec<String>,
}

fn default_watch_dir() -> PathBuf {
    PathBuf::from("./watch_folder")
}

fn default_training_dir() -> PathBuf {
    PathBuf::from("Updated")
}

fn default_revised_dir() -> PathBuf {
    PathBuf::from("Revised")
}

fn default_extensions() -> Vec<String> {
    vec!["csv".to_string(), "xlsx".to_string()]
}

fn default_null_markers() -> Vec<String> {
    DEFAULT_NULL_MARKERS.iter().map(|s| s.to_string()).collect()
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            watch_dir: default_watch_dir(),
            training_dir: default_training_dir(),
            revised_dir: default_revised_dir(),
            extensions: default_extensions(),
            case_insensitive_extensions: false,
            null_markers: default_null_markers(),
        }
    }
}

impl TriageConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::TriageError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::TriageError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(self.extensions.iter().cloned(), self.case_insensitive_extensions)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            null_markers: self.null_markers.clone(),
            case_insensitive_extensions: self.case_insensitive_extensions,
        }
    }

    pub fn artifact_writer(&self) -> ArtifactWriter {
        ArtifactWriter::new(&self.training_dir, &self.revised_dir)
    }
}
