//! Analysis event logging
//!
//! Records model mutations and detection outcomes as one JSON object per
//! line. Logging is disabled unless a file is configured through
//! [`Resolock`](crate::Resolock); every logging call is a cheap no-op in
//! the disabled mode.

use crate::core::types::AnalysisEvent;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Structure for a single log entry
#[derive(Debug, Serialize)]
pub struct LogEntry {
    /// Type of event that occurred
    pub event: AnalysisEvent,
    /// The ids involved: a node id, an edge id, a cycle, or a sequence
    pub subject: String,
    /// Seconds since Unix epoch with microsecond precision
    pub timestamp: f64,
}

/// Determines how the logger should operate
#[derive(Debug)]
pub enum LoggerMode {
    /// Logging is disabled entirely
    Disabled,
    /// Log to the specified file
    ToFile(File),
}

/// Logger for recording analysis events
pub struct EventLogger {
    mode: LoggerMode,
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogger {
    /// Create a new logger with logging disabled
    pub fn new() -> Self {
        EventLogger {
            mode: LoggerMode::Disabled,
        }
    }

    /// Create a new logger that writes to the specified file
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context("Failed to open log file")?;

        Ok(EventLogger {
            mode: LoggerMode::ToFile(file),
        })
    }

    /// Log an event based on the configured mode
    pub fn log_event(&self, event: AnalysisEvent, subject: &str) {
        let LoggerMode::ToFile(ref file) = self.mode else {
            return;
        };

        let now = Utc::now();
        let timestamp = now.timestamp() as f64 + now.timestamp_subsec_micros() as f64 / 1_000_000.0;

        let entry = LogEntry {
            event,
            subject: subject.to_string(),
            timestamp,
        };

        let mut file = file;
        if let Ok(json) = serde_json::to_string(&entry) {
            let _ = writeln!(file, "{}", json);
            let _ = file.flush();
        }
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        !matches!(self.mode, LoggerMode::Disabled)
    }
}

// Global logger instance
lazy_static::lazy_static! {
    static ref GLOBAL_LOGGER: Mutex<EventLogger> = Mutex::new(EventLogger::new());
}

/// Set the global logger to use the specified file, or disable logging if None
pub fn init_logger<P: AsRef<Path>>(path: Option<P>) -> Result<()> {
    if let Ok(mut global) = GLOBAL_LOGGER.lock() {
        match path {
            Some(path) => {
                *global =
                    EventLogger::with_file(path).context("Failed to create logger with file")?;
            }
            None => {
                *global = EventLogger::new(); // Disabled mode
            }
        }
    } else {
        anyhow::bail!("Failed to acquire lock on global logger");
    }
    Ok(())
}

/// Log an event to the global logger (if enabled)
pub fn log_event(event: AnalysisEvent, subject: &str) {
    if let Ok(logger) = GLOBAL_LOGGER.lock() {
        logger.log_event(event, subject);
    }
}
