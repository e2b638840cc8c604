//! Pick the newest supported file in the watched directory
//!
//! Only direct children are considered. Ties on modification time go to the
//! entry listed first, which depends on the filesystem's listing order.

use crate::error::{Result, TriageError};
use crate::types::CandidateFile;
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension allow-list for candidate files.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
    case_insensitive: bool,
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(["csv", "xlsx"], false)
    }
}

impl ExtensionFilter {
    /// Extensions are given without the leading dot.
    pub fn new<I, S>(extensions: I, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| {
                let e: String = e.into();
                let e = e.trim_start_matches('.').to_string();
                if case_insensitive {
                    e.to_ascii_lowercase()
                } else {
                    e
                }
            })
            .collect();
        Self {
            extensions,
            case_insensitive,
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if self.case_insensitive {
            let ext = ext.to_ascii_lowercase();
            self.extensions.iter().any(|e| *e == ext)
        } else {
            self.extensions.iter().any(|e| e == ext)
        }
    }
}

/// Select the most recently modified matching file, or `None` if there is none.
///
/// A missing or unreadable directory is an error, not an empty result.
pub fn select_latest(dir: &Path, filter: &ExtensionFilter) -> Result<Option<CandidateFile>> {
    let metadata = std::fs::metadata(dir).map_err(|e| TriageError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(TriageError::DirectoryUnavailable {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
        });
    }

    let mut latest: Option<CandidateFile> = None;
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                // The root itself failing means the directory cannot be listed
                if e.depth() == 0 {
                    return Err(TriageError::DirectoryUnavailable {
                        path: dir.to_path_buf(),
                        source: e.into(),
                    });
                }
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !filter.matches(&name) {
            continue;
        }

        let modified = match entry.metadata().ok().and_then(|m| m.modified().ok()) {
            Some(t) => DateTime::<Utc>::from(t),
            None => {
                warn!(path = %entry.path().display(), "Skipping entry without modification time");
                continue;
            }
        };
        debug!(file = %name, modified = %modified, "Candidate file");

        let newer = latest
            .as_ref()
            .map_or(true, |current| modified > current.modified_at);
        if newer {
            latest = Some(CandidateFile {
                name,
                path: entry.path().to_path_buf(),
                modified_at: modified,
            });
        }
    }

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{set_file_mtime, FileTime};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_filter_default_is_case_sensitive() {
        let filter = ExtensionFilter::default();
        assert!(filter.matches("a.csv"));
        assert!(filter.matches("a.xlsx"));
        assert!(!filter.matches("a.CSV"));
        assert!(!filter.matches("a.xls"));
        assert!(!filter.matches("csv"));
        assert!(!filter.matches("a.csv.bak"));
    }

    #[test]
    fn test_filter_case_insensitive() {
        let filter = ExtensionFilter::new([".CSV", "xlsx"], true);
        assert!(filter.matches("a.csv"));
        assert!(filter.matches("a.CSV"));
        assert!(filter.matches("a.XlSx"));
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = select_latest(&missing, &ExtensionFilter::default()).unwrap_err();
        assert!(matches!(err, TriageError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn test_file_path_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.csv");
        fs::write(&file, "a\n1\n").unwrap();
        let err = select_latest(&file, &ExtensionFilter::default()).unwrap_err();
        assert!(matches!(err, TriageError::DirectoryUnavailable { .. }));
    }

    #[test]
    fn test_empty_and_unsupported_only_yield_none() {
        let temp = TempDir::new().unwrap();
        assert!(select_latest(temp.path(), &ExtensionFilter::default())
            .unwrap()
            .is_none());

        fs::write(temp.path().join("notes.txt"), "hello").unwrap();
        fs::create_dir(temp.path().join("nested.csv")).unwrap();
        assert!(select_latest(temp.path(), &ExtensionFilter::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_newest_by_mtime_wins() {
        let temp = TempDir::new().unwrap();
        let old = temp.path().join("z_old.csv");
        let new = temp.path().join("a_new.xlsx");
        let ignored = temp.path().join("newest.json");
        fs::write(&old, "a\n1\n").unwrap();
        fs::write(&new, "not read here").unwrap();
        fs::write(&ignored, "{}").unwrap();
        set_file_mtime(&old, FileTime::from_unix_time(1_000_000, 0)).unwrap();
        set_file_mtime(&new, FileTime::from_unix_time(2_000_000, 0)).unwrap();
        set_file_mtime(&ignored, FileTime::from_unix_time(3_000_000, 0)).unwrap();

        let picked = select_latest(temp.path(), &ExtensionFilter::default())
            .unwrap()
            .unwrap();
        assert_eq!(picked.name, "a_new.xlsx");
        assert_eq!(picked.path, new);
        assert_eq!(picked.modified_at.timestamp(), 2_000_000);
    }
}
