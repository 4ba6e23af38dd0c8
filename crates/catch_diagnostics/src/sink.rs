//! Report sinks: the console, the append-only log file, and in-memory capture.

use crate::style::strip_styles;
use catch_config::EngineConfig;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Serializes the final write of every report so concurrent reports do not
/// interleave. Only the write is guarded; rendering happens outside.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// A destination for rendered reports.
pub trait ReportSink: Send + Sync {
    /// Writes one rendered report.
    fn write_report(&self, text: &str) -> io::Result<()>;
}

/// Writes reports to standard error, styling included.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn write_report(&self, text: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(text.as_bytes())?;
        stderr.flush()
    }
}

/// Appends reports to a file with all styling removed.
///
/// The file is created if missing and opened afresh for each report, so no
/// handle outlives the write.
#[derive(Clone, Debug)]
pub struct LogFileSink {
    path: PathBuf,
}

impl LogFileSink {
    /// Creates a sink appending to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for LogFileSink {
    fn write_report(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(strip_styles(text).as_bytes())?;
        file.flush()
    }
}

/// Collects reports in memory.
///
/// Used in place of the console when output must be inspected, e.g. in tests
/// or when embedding reports in another UI.
#[derive(Debug, Default)]
pub struct BufferSink {
    buffer: Mutex<String>,
    count: AtomicUsize,
}

impl BufferSink {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything written so far.
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Takes everything written so far, leaving the buffer empty.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns the number of reports written.
    pub fn report_count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl ReportSink for BufferSink {
    fn write_report(&self, text: &str) -> io::Result<()> {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
        Ok(())
    }
}

/// Writes a rendered report to standard error and, if configured, the log file.
pub fn dispatch(text: &str, config: &EngineConfig) {
    dispatch_to(&ConsoleSink, text, config);
}

/// Writes a rendered report to `console` and, if configured, the log file.
///
/// Sink failures are logged and otherwise ignored: reporting a failure must
/// not itself fail.
pub fn dispatch_to(console: &dyn ReportSink, text: &str, config: &EngineConfig) {
    let _guard = WRITE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(err) = console.write_report(text) {
        log::warn!("failed to write report to console: {err}");
    }
    if let Some(path) = &config.log_file_path {
        let log_file = LogFileSink::new(path);
        if let Err(err) = log_file.write_report(text) {
            log::warn!("failed to append report to {}: {err}", log_file.path().display());
        }
    }
}

/// Exits the process with status 1 if `config` asks for it.
///
/// Call only after [`dispatch`] has returned, so the report is never lost.
pub fn finish(config: &EngineConfig) {
    if config.exit_on_report {
        log::debug!("exiting after report as configured");
        std::process::exit(1);
    }
}
