//! Notification events the host asks notification plugins to deliver.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The fact a notification describes.
///
/// Marked non-exhaustive: new kinds are appended without a contract-version
/// bump, so notification plugins must tolerate kinds they do not know.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[non_exhaustive]
pub enum NotificationKind {
    /// A configured usage threshold was crossed.
    ThresholdReached,
    /// A quota or credit balance is fully consumed.
    QuotaExhausted,
    /// A stored credential is inside its expiry buffer.
    CredentialExpiring,
    /// A provider fetch failed and the dashboard is showing stale data.
    FetchFailed,
    /// A plugin changed lifecycle state (loaded, stopped, failed).
    PluginStateChanged,
}

/// How urgently a notification should be surfaced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NotificationSeverity {
    /// Routine information.
    Info,
    /// Needs attention soon.
    Warning,
    /// Needs attention now.
    Critical,
}

/// A fact the host wants delivered through a notification channel.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::notification::{
///     NotificationEvent, NotificationKind, NotificationSeverity,
/// };
///
/// let event = NotificationEvent::new(
///     NotificationKind::QuotaExhausted,
///     NotificationSeverity::Critical,
///     "Anthropic quota exhausted",
///     "The monthly token quota is fully consumed.",
///     1_700_000_000_000,
/// );
/// assert_eq!(event.severity(), NotificationSeverity::Critical);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    kind: NotificationKind,
    severity: NotificationSeverity,
    title: String,
    message: String,
    timestamp: i64,
}

impl NotificationEvent {
    /// Creates an event with the given kind, severity, and text.
    #[must_use]
    pub fn new(
        kind: NotificationKind,
        severity: NotificationSeverity,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            kind,
            severity,
            title: title.into(),
            message: message.into(),
            timestamp,
        }
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the urgency.
    #[must_use]
    pub const fn severity(&self) -> NotificationSeverity {
        self.severity
    }

    /// Returns the one-line headline.
    #[must_use]
    pub const fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the body text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns when the fact occurred, in epoch milliseconds.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

#[cfg(test)]
mod tests;
