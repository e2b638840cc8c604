//! Watch command - poll the drop folder until interrupted
//!
//! A failed cycle alerts the admin and the loop keeps going. SIGINT/SIGTERM
//! (Ctrl+C on Windows) stop the loop between polls.

use crate::cli::output::status_line;
use dropwatch::{AppConfig, Pipeline};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Sleep granularity while waiting for the next poll
const SHUTDOWN_CHECK_INTERVAL: Duration = Duration::from_millis(200);

/// Arguments for the watch command
#[derive(Debug)]
pub struct WatchArgs {
    pub watch_dir: Option<PathBuf>,
    pub interval: Option<u64>,
    pub max_runs: Option<u64>,
}

/// Counters for a finished watch loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatchStats {
    pub cycles: u64,
    pub failures: u64,
}

/// Execute the watch command
pub fn run(mut config: AppConfig, args: WatchArgs) -> anyhow::Result<()> {
    if let Some(secs) = args.interval {
        config.poll_interval_secs = secs;
    }
    let config = config.with_watch_dir(args.watch_dir);

    let shutdown = Arc::new(AtomicBool::new(false));
    install_signal_handlers(shutdown.clone())?;

    let pipeline = Pipeline::new(config);
    let stats = watch_loop(&pipeline, &shutdown, args.max_runs);
    println!(
        "Stopped after {} cycles ({} failed)",
        stats.cycles, stats.failures
    );
    Ok(())
}

/// Poll until `shutdown` is set or `max_runs` cycles have completed.
pub fn watch_loop(pipeline: &Pipeline, shutdown: &AtomicBool, max_runs: Option<u64>) -> WatchStats {
    let interval = pipeline.config().poll_interval();
    let mut stats = WatchStats::default();
    info!(
        dir = %pipeline.watch_dir().display(),
        interval_secs = interval.as_secs(),
        "Watching drop folder"
    );

    let budget_spent = |cycles: u64| max_runs.is_some_and(|max| cycles >= max);

    while !shutdown.load(Ordering::SeqCst) && !budget_spent(stats.cycles) {
        match pipeline.run_cycle_alerting() {
            Ok(result) => println!("{}", status_line(&result.outcome)),
            Err(err) => {
                stats.failures += 1;
                eprintln!("Cycle failed: {:#}", err);
            }
        }
        stats.cycles += 1;

        if budget_spent(stats.cycles) {
            break;
        }
        sleep_unless_shutdown(interval, shutdown);
    }

    info!(cycles = stats.cycles, failures = stats.failures, "Watch loop stopped");
    stats
}

fn sleep_unless_shutdown(total: Duration, shutdown: &AtomicBool) {
    let deadline = Instant::now() + total;
    while !shutdown.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        std::thread::sleep(SHUTDOWN_CHECK_INTERVAL.min(deadline - now));
    }
}

fn install_signal_handlers(shutdown: Arc<AtomicBool>) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let flag = shutdown.clone();
        std::thread::spawn(move || {
            if let Some(sig) = signals.forever().next() {
                info!("Received signal {}, stopping after the current cycle", sig);
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    #[cfg(windows)]
    {
        let flag = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Received Ctrl+C, stopping after the current cycle");
            flag.store(true, Ordering::SeqCst);
        })?;
    }

    let _ = shutdown;
    Ok(())
}
