//! Single-shot triage run: select → load → classify → partition/write → route

use crate::artifacts::{ArtifactCategory, ArtifactWriter};
use crate::classifier::classify;
use crate::config::TriageConfig;
use crate::error::Result;
use crate::loader::{load_dataset, LoadOptions};
use crate::partition::partition;
use crate::report::{NoFileReport, TriageOutcome, TriageReport};
use crate::router::route;
use crate::selector::{select_latest, ExtensionFilter};
use crate::types::{CandidateFile, QualityStatus};
use std::path::Path;
use tracing::{info, info_span};

/// Triage engine. Holds configuration only; no state survives between runs.
#[derive(Debug, Clone)]
pub struct Triage {
    filter: ExtensionFilter,
    load_options: LoadOptions,
    writer: ArtifactWriter,
}

impl Triage {
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            filter: config.extension_filter(),
            load_options: config.load_options(),
            writer: config.artifact_writer(),
        }
    }

    pub fn writer(&self) -> &ArtifactWriter {
        &self.writer
    }

    pub fn load_options(&self) -> &LoadOptions {
        &self.load_options
    }

    /// Triage the newest candidate in `dir`.
    ///
    /// Finding nothing is [`TriageOutcome::NoFile`], not an error. Artifacts
    /// written before a later failure in the same run are left in place.
    pub fn run(&self, dir: &Path) -> Result<TriageOutcome> {
        let _span = info_span!("triage", dir = %dir.display()).entered();

        let Some(candidate) = select_latest(dir, &self.filter)? else {
            info!("No CSV/XLSX files found");
            return Ok(TriageOutcome::NoFile(NoFileReport::new(dir)));
        };

        info!(file = %candidate.name, modified = %candidate.modified_at, "Picked latest file");
        self.triage_file(&candidate).map(TriageOutcome::Triaged)
    }

    /// Triage one already-selected file.
    pub fn triage_file(&self, candidate: &CandidateFile) -> Result<TriageReport> {
        let dataset = load_dataset(&candidate.path, &self.load_options)?;
        let assessment = classify(&dataset);
        let status = assessment.status;
        let next_stages = route(status).to_vec();

        info!(
            file = %candidate.name,
            status = %status,
            records = assessment.total_records,
            rows_with_nulls = assessment.rows_with_nulls,
            "Classified file"
        );

        let report = match status {
            QualityStatus::Empty => TriageReport {
                file: candidate.name.clone(),
                total_records: assessment.total_records,
                status,
                training_path: None,
                revised_path: None,
                next_stages,
            },
            QualityStatus::Partial => {
                let parts = partition(&dataset);
                let training_path = self.writer.write_subset(
                    &parts.clean,
                    &candidate.name,
                    ArtifactCategory::Training,
                )?;
                let revised_path = self.writer.write_subset(
                    &parts.revised,
                    &candidate.name,
                    ArtifactCategory::Revised,
                )?;
                TriageReport {
                    file: candidate.name.clone(),
                    total_records: parts.clean.len(),
                    status,
                    training_path: Some(training_path),
                    revised_path: Some(revised_path),
                    next_stages,
                }
            }
            QualityStatus::Complete => TriageReport {
                file: candidate.name.clone(),
                total_records: assessment.total_records,
                status,
                training_path: Some(candidate.path.clone()),
                revised_path: None,
                next_stages,
            },
        };

        info!(
            file = %report.file,
            next = ?report.next_stages,
            "Routed file"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Stage;
    use std::fs;
    use tempfile::TempDir;

    fn engine(root: &Path) -> Triage {
        Triage::new(&TriageConfig {
            watch_dir: root.join("drop"),
            training_dir: root.join("Updated"),
            revised_dir: root.join("Revised"),
            ..TriageConfig::default()
        })
    }

    #[test]
    fn test_all_null_rows_route_to_watchdog() {
        let temp = TempDir::new().unwrap();
        let drop = temp.path().join("drop");
        fs::create_dir_all(&drop).unwrap();
        fs::write(drop.join("blank.csv"), "a,b\n,\nNA,\n").unwrap();

        let outcome = engine(temp.path()).run(&drop).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.status, QualityStatus::Empty);
        assert_eq!(report.total_records, 2);
        assert_eq!(report.next_stages, vec![Stage::Watchdog]);
        assert!(report.training_path.is_none());
        assert!(!temp.path().join("Updated").exists());
        assert!(!temp.path().join("Revised").exists());
    }

    #[test]
    fn test_corrupt_file_propagates() {
        let temp = TempDir::new().unwrap();
        let drop = temp.path().join("drop");
        fs::create_dir_all(&drop).unwrap();
        fs::write(drop.join("bad.csv"), "a,b\n1,2,3\n").unwrap();

        let err = engine(temp.path()).run(&drop).unwrap_err();
        assert!(matches!(
            err,
            crate::TriageError::UnsupportedOrCorruptFile { .. }
        ));
    }
}
