//! Stakeholder notifications
//!
//! Composes the human-readable verdict for a triage outcome and hands it to a
//! [`NotificationDispatcher`]. Transport is someone else's job: the shipped
//! dispatchers either log the message or drop it as JSON into an outbox
//! directory for an external mailer.

use crate::config::NotifyConfig;
use anyhow::{Context, Result};
use chrono::Utc;
use dropwatch_triage::{QualityStatus, TriageOutcome};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A composed message, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// File to attach (the revised subset for partial files)
    pub attachment: Option<PathBuf>,
}

fn verdict(status: QualityStatus) -> &'static str {
    match status {
        QualityStatus::Empty => "the file is empty and can't be used for modelling",
        QualityStatus::Partial => {
            "the file meets the minimum required data for modelling. \
             Please update the attached records and resend the file for the next iteration"
        }
        QualityStatus::Complete => "the file contains data that is good to go for modelling",
    }
}

/// Verdict message for a triaged file. A run that found no file sends nothing.
pub fn compose_report(outcome: &TriageOutcome, config: &NotifyConfig) -> Option<Notification> {
    let report = outcome.report()?;
    Some(Notification {
        sender: config.sender.clone(),
        recipient: config.recipient.clone(),
        subject: format!("File Check Result: {}", report.file),
        body: format!(
            "The file {} has been processed and {}.",
            report.file,
            verdict(report.status)
        ),
        attachment: report.revised_path.clone(),
    })
}

/// Alert for a run that failed outright.
pub fn compose_failure(error: &anyhow::Error, config: &NotifyConfig) -> Notification {
    Notification {
        sender: config.sender.clone(),
        recipient: config.admin.clone(),
        subject: "Pipeline Failure Alert".to_string(),
        body: format!("The following error occurred in the pipeline: {:#}", error),
        attachment: None,
    }
}

/// Delivery seam.
pub trait NotificationDispatcher {
    fn dispatch(&self, notification: &Notification) -> Result<()>;
}

/// Logs the message and nothing else.
#[derive(Debug, Default)]
pub struct LogDispatcher;

impl NotificationDispatcher for LogDispatcher {
    fn dispatch(&self, notification: &Notification) -> Result<()> {
        info!(
            to = %notification.recipient,
            subject = %notification.subject,
            attachment = ?notification.attachment,
            "{}",
            notification.body
        );
        Ok(())
    }
}

/// Writes one pretty-printed JSON file per message into a directory.
#[derive(Debug, Clone)]
pub struct OutboxDispatcher {
    dir: PathBuf,
}

impl OutboxDispatcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl NotificationDispatcher for OutboxDispatcher {
    fn dispatch(&self, notification: &Notification) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create outbox: {}", self.dir.display()))?;

        let name = format!(
            "{}_{}.json",
            Utc::now().format("%Y%m%dT%H%M%S%.3fZ"),
            uuid::Uuid::new_v4().simple()
        );
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(notification)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write outbox message: {}", path.display()))?;

        info!(path = %path.display(), subject = %notification.subject, "Queued notification");
        Ok(())
    }
}

/// Pick the dispatcher the config asks for.
pub fn dispatcher_for(config: &NotifyConfig) -> Box<dyn NotificationDispatcher> {
    match &config.outbox_dir {
        Some(dir) => Box::new(OutboxDispatcher::new(dir)),
        None => Box::new(LogDispatcher),
    }
}
