//! Application configuration
//!
//! Loaded once from TOML at startup and passed down explicitly; nothing reads
//! process environment for credentials or paths.

use anyhow::{Context, Result};
use dropwatch_triage::TriageConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration for the `dropwatch` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub triage: TriageConfig,

    /// Seconds between watch-loop polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Addresses and hand-off location for stakeholder messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// From address
    #[serde(default)]
    pub sender: String,

    /// Who receives per-file verdicts
    #[serde(default)]
    pub recipient: String,

    /// Who receives pipeline failure alerts
    #[serde(default)]
    pub admin: String,

    /// When set, messages are written here as JSON for an external mailer
    #[serde(default)]
    pub outbox_dir: Option<PathBuf>,
}

fn default_poll_interval() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            triage: TriageConfig::default(),
            poll_interval_secs: default_poll_interval(),
            notify: NotifyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    /// Apply a `--watch-dir` override.
    pub fn with_watch_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.triage.watch_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert!(config.notify.outbox_dir.is_none());
    }

    #[test]
    fn test_load_nested_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dropwatch.toml");
        std::fs::write(
            &path,
            r#"
poll_interval_secs = 120

[triage]
watch_dir = "/srv/reports"
revised_dir = "/srv/revisit"

[notify]
sender = "pipeline@example.com"
recipient = "bank-ops@example.com"
admin = "oncall@example.com"
outbox_dir = "/srv/outbox"
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.poll_interval_secs, 120);
        assert_eq!(config.triage.watch_dir, PathBuf::from("/srv/reports"));
        assert_eq!(config.triage.revised_dir, PathBuf::from("/srv/revisit"));
        assert_eq!(config.triage.training_dir, PathBuf::from("Updated"));
        assert_eq!(config.notify.recipient, "bank-ops@example.com");
        assert_eq!(config.notify.outbox_dir, Some(PathBuf::from("/srv/outbox")));
    }

    #[test]
    fn test_watch_dir_override() {
        let config = AppConfig::default().with_watch_dir(Some(PathBuf::from("/tmp/in")));
        assert_eq!(config.triage.watch_dir, PathBuf::from("/tmp/in"));

        let config = AppConfig::default().with_watch_dir(None);
        assert_eq!(config.triage.watch_dir, PathBuf::from("./watch_folder"));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = AppConfig {
            poll_interval_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = AppConfig::load(Some(Path::new("/definitely/missing.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/missing.toml"));
    }
}
