//! Shared logging setup for Dropwatch binaries.
//!
//! Every run appends to `$DROPWATCH_HOME/logs/{app}.log`, rotated by size.
//! Stderr only shows warnings unless `verbose` is set.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "dropwatch=info,dropwatch_triage=info";
const MAX_LOG_FILES: usize = 5;
const MAX_LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Logging configuration shared by Dropwatch binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
}

/// Initialize tracing with a rolling file writer and stderr output.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let log_dir = ensure_logs_dir().context("Failed to ensure log directory")?;
    let file_writer = LogWriter::open(&log_dir, config.app_name, RotationPolicy::default())?;

    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_filter = if config.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(file_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    tracing::debug!(log_dir = %log_dir.display(), app = config.app_name, "Logging initialized");
    Ok(())
}

/// Get the Dropwatch home directory: ~/.dropwatch
///
/// `DROPWATCH_HOME` overrides it; without a home directory the current
/// directory is used.
pub fn dropwatch_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("DROPWATCH_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dropwatch")
}

/// Get the logs directory: ~/.dropwatch/logs
pub fn logs_dir() -> PathBuf {
    dropwatch_home().join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}

/// When the live log file is rolled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Live file plus rolled generations kept on disk
    pub max_files: usize,
    pub max_bytes: u64,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_files: MAX_LOG_FILES,
            max_bytes: MAX_LOG_FILE_SIZE,
        }
    }
}

/// `{app}.log` in a directory, rolled to `{app}.log.1`, `{app}.log.2`, ...
/// once the next write would exceed the size limit.
struct SizeRotatingFile {
    live: PathBuf,
    policy: RotationPolicy,
    file: Option<File>,
    written: u64,
}

impl SizeRotatingFile {
    fn open(dir: &Path, app_name: &str, policy: RotationPolicy) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let mut log = Self {
            live: dir.join(format!("{}.log", sanitize_name(app_name))),
            policy: RotationPolicy {
                max_files: policy.max_files.max(1),
                ..policy
            },
            file: None,
            written: 0,
        };
        log.reopen()?;
        if log.written > log.policy.max_bytes {
            log.roll()?;
        }
        Ok(log)
    }

    fn generation(&self, n: usize) -> PathBuf {
        let mut name = self.live.clone().into_os_string();
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(&self.live)?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    /// Drop the oldest generation, shift the rest up by one and start a
    /// fresh live file. A single-file policy just discards the live file.
    fn roll(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        let keep = self.policy.max_files - 1;
        if keep == 0 {
            remove_if_exists(&self.live)?;
        } else {
            remove_if_exists(&self.generation(keep))?;
            for n in (1..keep).rev() {
                rename_if_exists(&self.generation(n), &self.generation(n + 1))?;
            }
            rename_if_exists(&self.live, &self.generation(1))?;
        }

        self.reopen()
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn rename_if_exists(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

impl Write for SizeRotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.policy.max_bytes {
            self.roll()?;
        }
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file closed"))?;
        let n = file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Cloneable handle used as both the `MakeWriter` and the writer it makes.
#[derive(Clone)]
struct LogWriter(Arc<Mutex<SizeRotatingFile>>);

impl LogWriter {
    fn open(dir: &Path, app_name: &str, policy: RotationPolicy) -> Result<Self> {
        let file = SizeRotatingFile::open(dir, app_name, policy)
            .with_context(|| format!("Failed to open log file for {}", app_name))?;
        Ok(Self(Arc::new(Mutex::new(file))))
    }

    fn with_file<T>(&self, f: impl FnOnce(&mut SizeRotatingFile) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        f(&mut file)
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogWriter {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => ch,
            _ => '_',
        })
        .collect()
}
