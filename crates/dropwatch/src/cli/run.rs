//! Run command - triage the drop folder once
//!
//! Selects the newest report, classifies it, writes the training/revised
//! subsets, then executes the stages the outcome names.

use crate::cli::error::explain;
use crate::cli::output::{print_json, print_outcome};
use dropwatch::{AppConfig, Pipeline};
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Debug)]
pub struct RunArgs {
    pub watch_dir: Option<PathBuf>,
    pub json: bool,
}

/// Execute the run command
pub fn run(config: AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config.with_watch_dir(args.watch_dir));
    let result = pipeline.run_cycle_alerting().map_err(explain)?;

    if args.json {
        return print_json(&result);
    }

    print_outcome(&result.outcome);
    if let Some(records) = result.stages.preprocessed_records {
        println!("Preprocessing loaded {} records", records);
    }
    if result.stages.notified {
        println!("Stakeholder notification sent");
    }
    Ok(())
}
