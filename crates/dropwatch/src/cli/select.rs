//! Select command - show which file the next run would triage

use crate::cli::error::explain;
use crate::cli::output::{format_time, print_json, print_table};
use dropwatch::AppConfig;
use dropwatch_triage::select_latest;
use std::path::PathBuf;

/// Arguments for the select command
#[derive(Debug)]
pub struct SelectArgs {
    pub watch_dir: Option<PathBuf>,
    pub json: bool,
}

/// Execute the select command
pub fn run(config: AppConfig, args: SelectArgs) -> anyhow::Result<()> {
    let config = config.with_watch_dir(args.watch_dir);
    let dir = &config.triage.watch_dir;
    let candidate =
        select_latest(dir, &config.triage.extension_filter()).map_err(|e| explain(e.into()))?;

    if args.json {
        return print_json(&candidate);
    }

    match candidate {
        Some(file) => print_table(
            &["FILE", "BASE", "MODIFIED", "PATH"],
            vec![vec![
                file.name.clone(),
                file.base_name().to_string(),
                format_time(file.modified_at),
                file.path.display().to_string(),
            ]],
        ),
        None => println!("No qualifying files in {}", dir.display()),
    }
    Ok(())
}
