//! Operator-facing communication log.
//!
//! Every controller operation appends a timestamped line here. Entries are
//! also forwarded to the `log` facade so they show up under `RUST_LOG`.

use crate::constants::LOG_TIME_FORMAT;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single timestamped log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format(LOG_TIME_FORMAT), self.message)
    }
}

/// Scrolling session log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current local time
    pub fn push(&mut self, message: impl Into<String>) -> &LogEntry {
        let message = message.into();
        log::info!("{}", message);
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            message,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Most recent entries, oldest first
    pub fn tail(&self, count: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
