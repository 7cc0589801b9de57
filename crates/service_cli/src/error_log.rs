//! Persistent error log
//!
//! Appends one timestamped line per error to a plain-text file. Writing the
//! log never fails the caller: if the file cannot be opened or written, the
//! problem is reported through `tracing` and the message is dropped.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only error log file
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    /// Log writing to `path`; the file is created on first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `message` as a single line.
    ///
    /// Returns whether the line reached the file.
    pub fn record(&self, message: &str) -> bool {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let line = format!("[{}] {}", timestamp, message.replace('\n', " "));

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", line));

        match written {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to write error log"
                );
                false
            }
        }
    }

    /// Records an error value and mirrors it to `tracing` at error level
    pub fn record_error(&self, context: &str, error: &dyn std::error::Error) {
        tracing::error!(%error, "{}", context);
        self.record(&format!("{}: {}", context, error));
    }
}
