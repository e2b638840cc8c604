//! One polling cycle: triage the drop folder, then run the named stages.

use crate::config::AppConfig;
use crate::notify::{compose_failure, dispatcher_for, NotificationDispatcher};
use crate::stages::{StageRunner, StageSummary};
use anyhow::{Context, Result};
use dropwatch_triage::{Triage, TriageOutcome};
use serde::Serialize;
use std::path::Path;
use tracing::{error, warn};

/// Everything one cycle produced.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    pub outcome: TriageOutcome,
    pub stages: StageSummary,
}

pub struct Pipeline {
    config: AppConfig,
    triage: Triage,
    dispatcher: Box<dyn NotificationDispatcher>,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        let dispatcher = dispatcher_for(&config.notify);
        Self::with_dispatcher(config, dispatcher)
    }

    pub fn with_dispatcher(config: AppConfig, dispatcher: Box<dyn NotificationDispatcher>) -> Self {
        let triage = Triage::new(&config.triage);
        Self {
            config,
            triage,
            dispatcher,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn watch_dir(&self) -> &Path {
        &self.config.triage.watch_dir
    }

    /// Triage once and execute the resulting stages.
    pub fn run_cycle(&self) -> Result<CycleResult> {
        let dir = self.watch_dir();
        let outcome = self
            .triage
            .run(dir)
            .with_context(|| format!("Triage failed for {}", dir.display()))?;

        let runner = StageRunner::new(
            &self.config.notify,
            self.dispatcher.as_ref(),
            self.triage.load_options(),
        );
        let stages = runner.execute(&outcome)?;
        Ok(CycleResult { outcome, stages })
    }

    /// Like [`run_cycle`](Self::run_cycle), but a failure is also sent to the
    /// admin as an alert before being returned.
    pub fn run_cycle_alerting(&self) -> Result<CycleResult> {
        self.run_cycle().map_err(|err| {
            error!(error = %format!("{err:#}"), "Pipeline run failed");
            let alert = compose_failure(&err, &self.config.notify);
            if let Err(send_err) = self.dispatcher.dispatch(&alert) {
                warn!(error = %send_err, "Failed to dispatch failure alert");
            }
            err
        })
    }
}
