//! Dropwatch command-line launcher
//!
//! - **run**: triage the drop folder once
//! - **watch**: poll the drop folder until SIGINT/SIGTERM
//! - **select**: show the file the next run would pick
//! - **inspect**: classify one file without writing artifacts

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::error::HelpfulError;
use dropwatch::AppConfig;
use dropwatch_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "dropwatch",
    version,
    about = "Triage tabular reports dropped into a watched folder"
)]
struct Cli {
    /// Verbose console logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "DROPWATCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Triage the newest report once and run its next stages
    Run {
        /// Directory to triage (overrides the config)
        #[arg(short, long)]
        watch_dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Poll the drop folder until interrupted
    Watch {
        /// Directory to watch (overrides the config)
        #[arg(short, long)]
        watch_dir: Option<PathBuf>,

        /// Seconds between polls (overrides the config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many cycles
        #[arg(long)]
        max_runs: Option<u64>,
    },

    /// Show which file the next run would triage
    Select {
        /// Directory to look in (overrides the config)
        #[arg(short, long)]
        watch_dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a single file without writing anything
    Inspect {
        /// CSV or XLSX file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(LogConfig {
        app_name: "dropwatch",
        verbose: cli.verbose,
    }) {
        eprintln!("Warning: failed to initialize logging: {:#}", err);
    }

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}

fn run_command(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).map_err(|err| match &cli.config {
        Some(path) => HelpfulError::config_unreadable(path, &err).into(),
        None => err,
    })?;

    match cli.command {
        Commands::Run { watch_dir, json } => {
            cli::run::run(config, cli::run::RunArgs { watch_dir, json })
        }
        Commands::Watch {
            watch_dir,
            interval,
            max_runs,
        } => cli::watch::run(
            config,
            cli::watch::WatchArgs {
                watch_dir,
                interval,
                max_runs,
            },
        ),
        Commands::Select { watch_dir, json } => {
            cli::select::run(config, cli::select::SelectArgs { watch_dir, json })
        }
        Commands::Inspect { file, json } => {
            cli::inspect::run(config, cli::inspect::InspectArgs { file, json })
        }
    }
}
