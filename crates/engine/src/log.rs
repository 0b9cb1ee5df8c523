// ABOUTME: Leveled diagnostic sink that metadata extractors report missing fields to.
// ABOUTME: Ships a tracing-backed sink for production and an in-memory sink for inspection.

//! Diagnostic logging for extractors.
//!
//! Extractors never abort on a missing optional field; they report it to a
//! [`DiagnosticLog`] and carry on. The sink is shared by reference and must be
//! safe for concurrent append.

use std::fmt;
use std::sync::Mutex;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", s)
    }
}

/// An append-only, leveled sink for extractor diagnostics.
pub trait DiagnosticLog: Send + Sync {
    /// Appends one message at the given level.
    fn log(&self, level: Level, message: &str);

    /// Shorthand for `log(Level::Debug, ..)`.
    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Shorthand for `log(Level::Warning, ..)`.
    fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }
}

/// Forwards diagnostics to the `tracing` macros under the `tei` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl DiagnosticLog for TracingLog {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!(target: "tei", "{}", message),
            Level::Info => tracing::info!(target: "tei", "{}", message),
            Level::Warning => tracing::warn!(target: "tei", "{}", message),
            Level::Error | Level::Critical => {
                tracing::error!(target: "tei", level = %level, "{}", message)
            }
        }
    }
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
}

/// Keeps every diagnostic in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of entries recorded at exactly `level`.
    pub fn count(&self, level: Level) -> usize {
        self.entries().iter().filter(|e| e.level == level).count()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }
}

impl DiagnosticLog for MemoryLog {
    fn log(&self, level: Level, message: &str) {
        let entry = LogEntry {
            level,
            message: message.to_string(),
        };
        match self.entries.lock() {
            Ok(mut guard) => guard.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
