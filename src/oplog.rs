//! Line-oriented operation log
//!
//! Every provider branch (cache hit, request error, decode error, success)
//! lands here as one timestamped line. The log is an explicitly injected
//! instance rather than a process-wide singleton; its internal mutex keeps
//! concurrent call sites from interleaving lines.

use crate::constants::OPLOG_SUMMARY_MAX;
use chrono::Utc;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// Append-only operation log with serialized writes
pub struct OpLog {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl OpLog {
    /// Opens (or creates) the log file at `path` in append mode
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_sink(BufWriter::new(file)))
    }

    /// Builds a log writing to an arbitrary sink
    pub fn with_sink(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Records a completed operation with a short result summary
    pub fn success(&self, operation: &str, summary: &str) {
        self.write_line(operation, "result", &truncate(summary, OPLOG_SUMMARY_MAX));
    }

    /// Records a failed operation
    pub fn failure(&self, operation: &str, error: &dyn Display) {
        self.write_line(operation, "error", &error.to_string());
    }

    fn write_line(&self, operation: &str, kind: &str, detail: &str) {
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        let line = format!(
            "{} operation={} {}={}\n",
            Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            operation,
            kind,
            detail
        );
        if let Err(e) = sink.write_all(line.as_bytes()).and_then(|_| sink.flush()) {
            tracing::warn!(error = %e, "Failed to write operation log line");
        }
    }
}

/// Clips a summary to `max` bytes on a char boundary
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
