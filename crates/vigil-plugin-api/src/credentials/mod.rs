//! Credential bundles and discovery results.
//!
//! Provider and agent plugins own credential discovery: they look for
//! secrets in the environment, config, or an external auth store, and hand
//! back a [`CredentialResult`]. "No credentials yet" is an ordinary
//! outcome, not an error path, so the result is a plain value rather than
//! a `Result`.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Expiry buffer applied by [`is_token_expired`], in milliseconds.
///
/// Five minutes, so callers refresh proactively rather than after a hard
/// expiry mid-request.
pub const DEFAULT_EXPIRY_BUFFER_MS: i64 = 300_000;

/// Where a credential bundle was found.
///
/// Provenance for audit and UX, not a security boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CredentialSource {
    /// An environment variable.
    Env,
    /// The OpenCode auth store.
    Opencode,
    /// An external auth flow (OAuth consent, device code, ...).
    External,
    /// The plugin's own persisted config.
    Config,
}

/// Token-based credential detail.
///
/// Optional fields are omitted from serialization entirely when absent;
/// downstream equality checks distinguish "absent" from
/// "present-but-empty".
///
/// # Example
///
/// ```
/// use vigil_plugin_api::credentials::OAuthCredentials;
///
/// let oauth = OAuthCredentials::new("tok").with_refresh_token("r");
/// assert_eq!(oauth.refresh_token(), Some("r"));
/// assert!(oauth.expires_at().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthCredentials {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    managed_project_id: Option<String>,
}

impl OAuthCredentials {
    /// Creates a detail object holding only the access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            account_id: None,
            managed_project_id: None,
        }
    }

    /// Attaches a refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Attaches an expiry instant in epoch milliseconds.
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: i64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Attaches the provider-side account identifier.
    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Attaches the managed project identifier.
    #[must_use]
    pub fn with_managed_project_id(mut self, managed_project_id: impl Into<String>) -> Self {
        self.managed_project_id = Some(managed_project_id.into());
        self
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Returns the refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the expiry instant in epoch milliseconds; `None` means the
    /// token never expires.
    #[must_use]
    pub const fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    /// Returns the account identifier, if any.
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Returns the managed project identifier, if any.
    #[must_use]
    pub fn managed_project_id(&self) -> Option<&str> {
        self.managed_project_id.as_deref()
    }
}

/// A resolved secret bundle for a provider or agent.
///
/// At most one of `api_key` and `oauth` is meaningful at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oauth: Option<OAuthCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_id: Option<String>,
    source: CredentialSource,
}

impl Credentials {
    /// Wraps an API key found in the environment.
    #[must_use]
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::api_key_from(key, CredentialSource::Env)
    }

    /// Wraps an API key with an explicit provenance.
    #[must_use]
    pub fn api_key_from(key: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            api_key: Some(key.into()),
            oauth: None,
            group_id: None,
            source,
        }
    }

    /// Wraps OAuth detail obtained from an external auth flow.
    ///
    /// The default provenance is [`CredentialSource::External`], distinct
    /// from the API-key default of [`CredentialSource::Env`], because OAuth
    /// tokens typically originate outside the process environment.
    #[must_use]
    pub const fn oauth(oauth: OAuthCredentials) -> Self {
        Self::oauth_from(oauth, CredentialSource::External)
    }

    /// Wraps OAuth detail with an explicit provenance.
    #[must_use]
    pub const fn oauth_from(oauth: OAuthCredentials, source: CredentialSource) -> Self {
        Self {
            api_key: None,
            oauth: Some(oauth),
            group_id: None,
            source,
        }
    }

    /// Attaches a billing group identifier.
    #[must_use]
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Returns the API key, if this bundle holds one.
    #[must_use]
    pub fn api_key_value(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Returns the OAuth detail, if this bundle holds one.
    #[must_use]
    pub const fn oauth_value(&self) -> Option<&OAuthCredentials> {
        self.oauth.as_ref()
    }

    /// Returns the billing group identifier, if any.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    /// Returns where the bundle was found.
    #[must_use]
    pub const fn source(&self) -> CredentialSource {
        self.source
    }
}

/// Why a discovery attempt came back empty-handed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CredentialFailure {
    /// No credential was found anywhere the plugin looked.
    Missing,
    /// A credential was found but its token has expired.
    Expired,
    /// A credential was found but the provider rejected it.
    Invalid,
    /// Discovery itself failed; a message is mandatory.
    Error,
}

/// Outcome of a credential discovery attempt.
///
/// The sum type makes "found implies credentials present" hold by
/// construction.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::credentials::{CredentialFailure, CredentialResult, Credentials};
///
/// let found = CredentialResult::found(Credentials::api_key("sk-1"));
/// assert!(found.is_found());
///
/// let missing = CredentialResult::missing().with_message("no key");
/// assert_eq!(missing.reason(), Some(CredentialFailure::Missing));
/// assert_eq!(missing.message(), Some("no key"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CredentialResult {
    /// Discovery succeeded.
    Found {
        /// The resolved secret bundle.
        credentials: Credentials,
    },
    /// Discovery produced no usable credentials.
    Failed {
        /// Why the attempt failed.
        reason: CredentialFailure,
        /// Optional human-readable explanation.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl CredentialResult {
    /// Wraps a successfully discovered bundle.
    #[must_use]
    pub const fn found(credentials: Credentials) -> Self {
        Self::Found { credentials }
    }

    /// No credential was found.
    #[must_use]
    pub const fn missing() -> Self {
        Self::Failed {
            reason: CredentialFailure::Missing,
            message: None,
        }
    }

    /// A credential was found but has expired.
    #[must_use]
    pub const fn expired() -> Self {
        Self::Failed {
            reason: CredentialFailure::Expired,
            message: None,
        }
    }

    /// A credential was found but the provider rejected it.
    #[must_use]
    pub const fn invalid() -> Self {
        Self::Failed {
            reason: CredentialFailure::Invalid,
            message: None,
        }
    }

    /// Discovery itself failed.
    ///
    /// The message is mandatory here, unlike the other failure
    /// constructors: an error result without an explanation is not
    /// actionable.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Failed {
            reason: CredentialFailure::Error,
            message: Some(message.into()),
        }
    }

    /// Attaches an explanation to a failure result.
    ///
    /// Has no effect on a [`CredentialResult::Found`] value.
    #[must_use]
    pub fn with_message(self, text: impl Into<String>) -> Self {
        match self {
            Self::Found { .. } => self,
            Self::Failed { reason, .. } => Self::Failed {
                reason,
                message: Some(text.into()),
            },
        }
    }

    /// Returns `true` when discovery succeeded.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Returns the discovered bundle, if any.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::Found { credentials } => Some(credentials),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the failure reason, if discovery failed.
    #[must_use]
    pub const fn reason(&self) -> Option<CredentialFailure> {
        match self {
            Self::Found { .. } => None,
            Self::Failed { reason, .. } => Some(*reason),
        }
    }

    /// Returns the failure explanation, if one was attached.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Found { .. } => None,
            Self::Failed { message, .. } => message.as_deref(),
        }
    }
}

/// Returns `true` when a token expiring at `expires_at` (epoch ms) is
/// within [`DEFAULT_EXPIRY_BUFFER_MS`] of expiry.
///
/// `None` means the token never expires, so the answer is always `false`.
#[must_use]
pub fn is_token_expired(expires_at: Option<i64>) -> bool {
    is_token_expired_with_buffer(expires_at, DEFAULT_EXPIRY_BUFFER_MS)
}

/// Returns `true` when a token expiring at `expires_at` (epoch ms) is
/// within `buffer_ms` of expiry.
#[must_use]
pub fn is_token_expired_with_buffer(expires_at: Option<i64>, buffer_ms: i64) -> bool {
    expired_relative_to(expires_at, buffer_ms, now_epoch_ms())
}

const fn expired_relative_to(expires_at: Option<i64>, buffer_ms: i64, now_ms: i64) -> bool {
    match expires_at {
        None => false,
        Some(at) => at <= now_ms.saturating_add(buffer_ms),
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests;
