//! Execute the stages a triage run names
//!
//! This is a thin driver. `classifier` sends the verdict and `preprocessing`
//! loads the training file and reports its size. `watchdog` leaves the retry
//! to the next poll, but an EMPTY file still gets its verdict sent so the
//! stakeholder hears about every triaged file.

use crate::config::NotifyConfig;
use crate::notify::{compose_report, NotificationDispatcher};
use anyhow::{Context, Result};
use dropwatch_triage::{load_dataset, LoadOptions, Stage, TriageOutcome};
use serde::Serialize;
use tracing::{debug, info};

/// What ran for one outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    pub executed: Vec<Stage>,
    pub notified: bool,
    pub preprocessed_records: Option<usize>,
}

pub struct StageRunner<'a> {
    notify: &'a NotifyConfig,
    dispatcher: &'a dyn NotificationDispatcher,
    load_options: &'a LoadOptions,
}

impl<'a> StageRunner<'a> {
    pub fn new(
        notify: &'a NotifyConfig,
        dispatcher: &'a dyn NotificationDispatcher,
        load_options: &'a LoadOptions,
    ) -> Self {
        Self {
            notify,
            dispatcher,
            load_options,
        }
    }

    /// Run `outcome.next_stages()` in order. Stops at the first failure.
    pub fn execute(&self, outcome: &TriageOutcome) -> Result<StageSummary> {
        let mut summary = StageSummary::default();
        for stage in outcome.next_stages() {
            match stage {
                Stage::Watchdog => {
                    debug!("Watchdog stage: waiting for the next poll");
                    summary.notified |= self.send_verdict(outcome)?;
                }
                Stage::Classifier => {
                    summary.notified |= self.send_verdict(outcome)?;
                }
                Stage::Preprocessing => {
                    summary.preprocessed_records = self.preprocess(outcome)?;
                }
            }
            summary.executed.push(*stage);
        }
        Ok(summary)
    }

    /// Dispatch the verdict for a triaged file. `false` when there was no file.
    fn send_verdict(&self, outcome: &TriageOutcome) -> Result<bool> {
        let Some(note) = compose_report(outcome, self.notify) else {
            return Ok(false);
        };
        self.dispatcher
            .dispatch(&note)
            .context("Failed to dispatch notification")?;
        Ok(true)
    }

    fn preprocess(&self, outcome: &TriageOutcome) -> Result<Option<usize>> {
        let Some(path) = outcome.report().and_then(|r| r.training_path.as_deref()) else {
            return Ok(None);
        };
        let dataset = load_dataset(path, self.load_options)
            .with_context(|| format!("Preprocessing failed to load {}", path.display()))?;
        info!(path = %path.display(), records = dataset.len(), "Preprocessing file");
        Ok(Some(dataset.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notification;
    use dropwatch_triage::{NoFileReport, QualityStatus, TriageReport};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<Notification>>,
    }

    impl NotificationDispatcher for Recorder {
        fn dispatch(&self, notification: &Notification) -> Result<()> {
            self.sent.borrow_mut().push(notification.clone());
            Ok(())
        }
    }

    #[test]
    fn test_no_file_only_runs_watchdog() {
        let recorder = Recorder::default();
        let notify = NotifyConfig::default();
        let options = LoadOptions::default();
        let runner = StageRunner::new(&notify, &recorder, &options);

        let summary = runner
            .execute(&TriageOutcome::NoFile(NoFileReport::new("drop")))
            .unwrap();
        assert_eq!(summary.executed, vec![Stage::Watchdog]);
        assert!(!summary.notified);
        assert!(recorder.sent.borrow().is_empty());
    }

    #[test]
    fn test_empty_file_verdict_is_sent_from_watchdog() {
        let recorder = Recorder::default();
        let notify = NotifyConfig::default();
        let options = LoadOptions::default();
        let runner = StageRunner::new(&notify, &recorder, &options);

        let outcome = TriageOutcome::Triaged(TriageReport {
            file: "blank.csv".to_string(),
            total_records: 1,
            status: QualityStatus::Empty,
            training_path: None,
            revised_path: None,
            next_stages: vec![Stage::Watchdog],
        });
        let summary = runner.execute(&outcome).unwrap();

        assert_eq!(summary.executed, vec![Stage::Watchdog]);
        assert!(summary.notified);
        assert_eq!(summary.preprocessed_records, None);
        let sent = recorder.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("empty and can't be used"));
        assert!(sent[0].attachment.is_none());
    }

    #[test]
    fn test_forward_stages_notify_and_preprocess() {
        let temp = TempDir::new().unwrap();
        let training = temp.path().join("sales.csv");
        std::fs::write(&training, "id,v\n1,a\n2,b\n3,c\n").unwrap();

        let recorder = Recorder::default();
        let notify = NotifyConfig::default();
        let options = LoadOptions::default();
        let runner = StageRunner::new(&notify, &recorder, &options);

        let outcome = TriageOutcome::Triaged(TriageReport {
            file: "sales.csv".to_string(),
            total_records: 3,
            status: QualityStatus::Complete,
            training_path: Some(training),
            revised_path: None,
            next_stages: vec![Stage::Classifier, Stage::Preprocessing],
        });
        let summary = runner.execute(&outcome).unwrap();

        assert_eq!(summary.executed, vec![Stage::Classifier, Stage::Preprocessing]);
        assert!(summary.notified);
        assert_eq!(summary.preprocessed_records, Some(3));
        assert_eq!(recorder.sent.borrow().len(), 1);
    }

    #[test]
    fn test_missing_training_file_fails_preprocessing() {
        let recorder = Recorder::default();
        let notify = NotifyConfig::default();
        let options = LoadOptions::default();
        let runner = StageRunner::new(&notify, &recorder, &options);

        let outcome = TriageOutcome::Triaged(TriageReport {
            file: "gone.csv".to_string(),
            total_records: 1,
            status: QualityStatus::Complete,
            training_path: Some(PathBuf::from("/definitely/missing/gone.csv")),
            revised_path: None,
            next_stages: vec![Stage::Preprocessing],
        });
        let err = runner.execute(&outcome).unwrap_err();
        assert!(format!("{err:#}").contains("gone.csv"));
    }
}
