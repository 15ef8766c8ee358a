//! Domain errors raised by contract validation and plugin lifecycle calls.
//!
//! All errors use `thiserror`-derived enums with structured context so the
//! host can inspect the failure programmatically. Credential discovery
//! failures are deliberately *not* errors; they are ordinary
//! [`CredentialResult`](crate::credentials::CredentialResult) values.

use thiserror::Error;

/// Direction a version mismatch must be resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// The plugin targets an older contract than the host supports.
    UpgradePlugin,
    /// The plugin targets a newer contract than the host supports.
    UpgradeHost,
}

impl Remediation {
    /// Returns the remediation directive as user-facing text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpgradePlugin => "upgrade the plugin",
            Self::UpgradeHost => "upgrade the host",
        }
    }
}

impl std::fmt::Display for Remediation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors arising from the plugin contract.
#[derive(Debug, Error)]
pub enum PluginError {
    /// An identity or configuration field failed validation.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the field that failed.
        field: String,
        /// The exact rule that was broken.
        message: String,
    },

    /// The plugin declares a contract version the host does not support.
    #[error(
        "plugin '{plugin_id}' declares contract version {declared} but this \
         host supports {supported}; {remediation}"
    )]
    IncompatibleVersion {
        /// Identifier of the offending plugin.
        plugin_id: String,
        /// Contract version the plugin was built against.
        declared: u32,
        /// Contract version this package supports.
        supported: u32,
        /// Which side of the boundary must move.
        remediation: Remediation,
    },

    /// An HTTP request made through a host-provided client failed.
    ///
    /// The in-memory mock client never produces this variant; unmatched
    /// URLs resolve with the configured default status instead.
    #[error("http request to '{url}' failed: {message}")]
    Http {
        /// URL that was requested.
        url: String,
        /// Transport-level failure description.
        message: String,
    },

    /// A plugin lifecycle hook reported a failure to the host.
    #[error("plugin '{plugin_id}' {hook} hook failed: {message}")]
    Lifecycle {
        /// Identifier of the plugin whose hook failed.
        plugin_id: String,
        /// Hook name (`initialize`, `start`, `stop`, ...).
        hook: String,
        /// Human-readable failure description.
        message: String,
    },
}

impl PluginError {
    /// Builds a [`PluginError::Validation`] for the given field and rule.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
