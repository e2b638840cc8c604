//! Dropwatch application layer
//!
//! Wires the triage core to configuration, stakeholder notifications and the
//! stage executor used by the `dropwatch` binary.

pub mod config;
pub mod notify;
pub mod pipeline;
pub mod stages;

pub use config::{AppConfig, NotifyConfig};
pub use notify::{Notification, NotificationDispatcher};
pub use pipeline::{CycleResult, Pipeline};
pub use stages::{StageRunner, StageSummary};
