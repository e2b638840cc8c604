//! Persist clean / revised subsets at deterministic paths
//!
//! Layout: `{root}/{base name}/{artifact name}` where the roots come from
//! config (`Updated/` and `Revised/` by default). Writes are full overwrites;
//! nothing is rolled back if a later write in the same run fails.
//!
//! The artifact name is the source file name for `.csv` sources. Subsets are
//! always written as CSV, so any other source keeps its stem and gets a `.csv`
//! extension instead of its own name: `sales.xlsx` lands at
//! `Updated/sales/sales.csv`, not `Updated/sales/sales.xlsx`.

use crate::dataset::Dataset;
use crate::error::{Result, TriageError};
use crate::types::base_name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Which tree a subset lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactCategory {
    /// Null-free rows, ready for preprocessing
    Training,
    /// Rows to send back for correction
    Revised,
}

impl ArtifactCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactCategory::Training => "training",
            ArtifactCategory::Revised => "revised",
        }
    }
}

impl fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifact file name: the original name for `.csv`, otherwise the extension
/// is swapped for `.csv` since the written encoding is always CSV.
pub fn artifact_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => file_name.to_string(),
        _ => format!("{}.csv", base_name(file_name)),
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    training_root: PathBuf,
    revised_root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(training_root: impl Into<PathBuf>, revised_root: impl Into<PathBuf>) -> Self {
        Self {
            training_root: training_root.into(),
            revised_root: revised_root.into(),
        }
    }

    pub fn root(&self, category: ArtifactCategory) -> &Path {
        match category {
            ArtifactCategory::Training => &self.training_root,
            ArtifactCategory::Revised => &self.revised_root,
        }
    }

    /// Where a subset of `file_name` would be written. No I/O.
    pub fn target_path(&self, category: ArtifactCategory, file_name: &str) -> PathBuf {
        self.root(category)
            .join(base_name(file_name))
            .join(artifact_file_name(file_name))
    }

    /// Write `subset` as CSV, creating the parent directory if needed.
    pub fn write_subset(
        &self,
        subset: &Dataset,
        file_name: &str,
        category: ArtifactCategory,
    ) -> Result<PathBuf> {
        let target = self.target_path(category, file_name);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).map_err(|e| TriageError::artifact_write(dir, e))?;
        }

        let file = File::create(&target).map_err(|e| TriageError::artifact_write(&target, e))?;
        subset
            .write_csv(BufWriter::new(file))
            .map_err(|e| TriageError::artifact_write(&target, e))?;

        info!(
            category = %category,
            path = %target.display(),
            rows = subset.len(),
            "Wrote artifact"
        );
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;
    use tempfile::TempDir;

    fn subset(values: &[&str]) -> Dataset {
        Dataset::new(
            vec!["v".into()],
            values.iter().map(|v| std::iter::once(Some(*v)).collect::<Row>()).collect(),
        )
    }

    #[test]
    fn test_target_path_layout() {
        let writer = ArtifactWriter::new("Updated", "Revised");
        assert_eq!(
            writer.target_path(ArtifactCategory::Training, "sales.csv"),
            PathBuf::from("Updated/sales/sales.csv")
        );
        assert_eq!(
            writer.target_path(ArtifactCategory::Revised, "q3.report.xlsx"),
            PathBuf::from("Revised/q3.report/q3.report.csv")
        );
    }

    #[test]
    fn test_artifact_file_name() {
        assert_eq!(artifact_file_name("a.csv"), "a.csv");
        assert_eq!(artifact_file_name("a.xlsx"), "a.csv");
        assert_eq!(artifact_file_name("a.CSV"), "a.csv");
    }

    #[test]
    fn test_write_subset_creates_dirs_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp.path().join("Updated"), temp.path().join("Revised"));

        let first = writer
            .write_subset(&subset(&["1", "2", "3"]), "sales.csv", ArtifactCategory::Training)
            .unwrap();
        assert_eq!(first, temp.path().join("Updated/sales/sales.csv"));
        assert_eq!(fs::read_to_string(&first).unwrap(), "v\n1\n2\n3\n");

        // Existing directory is fine; content is replaced, not appended
        let second = writer
            .write_subset(&subset(&["9"]), "sales.csv", ArtifactCategory::Training)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "v\n9\n");
    }

    #[test]
    fn test_write_subset_fails_when_root_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("Revised");
        fs::write(&blocker, "not a directory").unwrap();
        let writer = ArtifactWriter::new(temp.path().join("Updated"), &blocker);

        let err = writer
            .write_subset(&subset(&["1"]), "sales.csv", ArtifactCategory::Revised)
            .unwrap_err();
        assert!(matches!(err, TriageError::ArtifactWriteFailure { .. }));
    }
}
