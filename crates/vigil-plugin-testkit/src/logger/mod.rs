//! Capturing logger for plugin unit tests.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use vigil_plugin_api::context::{LogLevel, PluginLogger};

/// One captured log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    level: LogLevel,
    message: String,
    data: Option<Value>,
}

impl LogEntry {
    /// Returns the log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns the message text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns the structured data, if the call carried any.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

/// A [`PluginLogger`] that records every call in invocation order.
///
/// No filtering, no formatting: raw capture for assertions.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::context::{LogLevel, PluginLogger};
/// use vigil_plugin_testkit::MockLogger;
///
/// let logger = MockLogger::new();
/// logger.warn("rate limited");
/// let entries = logger.entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].level(), LogLevel::Warn);
/// ```
#[derive(Debug, Default)]
pub struct MockLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MockLogger {
    /// Creates a logger with no captured entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every captured entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discards every captured entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl PluginLogger for MockLogger {
    fn log(&self, level: LogLevel, message: &str, data: Option<&Value>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                message: message.to_owned(),
                data: data.cloned(),
            });
    }
}
