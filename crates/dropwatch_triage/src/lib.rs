//! Dropwatch Triage - Drop Folder Quality Gate
//!
//! Picks the newest tabular report from a watched folder, decides whether its
//! data is fit for modelling and names the stages that must run next.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌───────────────┐
//! │  Selector   │     │   Loader    │     │ Classifier  │     │    Router     │
//! │ (latest     │────▶│ (csv/xlsx → │────▶│ (EMPTY /    │────▶│ (status →     │
//! │  mtime)     │     │  Dataset)   │     │  PARTIAL /  │     │  next stages) │
//! └─────────────┘     └─────────────┘     │  COMPLETE)  │     └───────────────┘
//!                                         └──────┬──────┘
//!                                                │ PARTIAL
//!                                         ┌──────▼──────┐     ┌───────────────┐
//!                                         │ Partitioner │────▶│ Artifact      │
//!                                         │ (clean /    │     │ Writer        │
//!                                         │  revised)   │     │ (Updated/,    │
//!                                         └─────────────┘     │  Revised/)    │
//!                                                             └───────────────┘
//! ```
//!
//! # Core Concepts
//!
//! - **Candidate file**: a directory entry whose extension is supported
//! - **Quality status**: `EMPTY`, `PARTIAL` or `COMPLETE`
//! - **Clean / revised subset**: null-free and null-containing rows of a partial file
//! - **Stage**: a downstream step named by the router, executed elsewhere

pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod orchestrator;
pub mod partition;
pub mod report;
pub mod router;
pub mod selector;
pub mod types;

// Re-exports for convenience
pub use artifacts::{ArtifactCategory, ArtifactWriter};
pub use classifier::{classify, ColumnNulls, QualityAssessment};
pub use config::TriageConfig;
pub use dataset::{Dataset, Row};
pub use error::{Result, TriageError};
pub use loader::{load_dataset, LoadOptions};
pub use orchestrator::Triage;
pub use partition::{partition, RowPartition};
pub use report::{NoFileReport, NoFileStatus, TriageOutcome, TriageReport};
pub use router::{route, Stage, NO_FILE_STAGES};
pub use selector::{select_latest, ExtensionFilter};
pub use types::{CandidateFile, QualityStatus, TableFormat};
