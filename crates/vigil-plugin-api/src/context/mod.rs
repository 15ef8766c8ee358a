//! Capability bundles the host injects into plugin method calls.
//!
//! The host implements the traits in this module with real, sandboxed
//! machinery (an HTTP client enforcing the manifest's domain allowlist, a
//! persistent key-value store, allowlisted env and file access). The
//! `vigil-plugin-testkit` crate implements the same traits with in-memory
//! fakes, so plugin code written against one runs unmodified against the
//! other.
//!
//! The four context shapes different plugin methods receive are not
//! independent types: [`PluginContext`] is the canonical superset, and the
//! narrower shapes are projections derived from it, so the definitions
//! cannot drift apart.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::config::ConfigValues;
use crate::credentials::Credentials;
use crate::error::PluginError;

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Severity of a plugin log line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Routine progress.
    Info,
    /// Unexpected but recoverable.
    Warn,
    /// A failure the user should see.
    Error,
}

/// Structured logger handed to plugins.
///
/// The host routes these lines into its own logging stack; the testkit
/// records them for assertions.
pub trait PluginLogger: Send + Sync {
    /// Records one log line with optional structured data.
    fn log(&self, level: LogLevel, message: &str, data: Option<&Value>);

    /// Records a debug line.
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    /// Records an info line.
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Records a warning line.
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, None);
    }

    /// Records an error line.
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Request options passed to [`HttpClient::fetch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInit {
    method: String,
    #[serde(default)]
    headers: std::collections::BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

impl RequestInit {
    /// Creates options for the given HTTP method.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            headers: std::collections::BTreeMap::new(),
            body: None,
        }
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Attaches a request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &str {
        self.method.as_str()
    }

    /// Returns the request headers, keyed by lowercase name.
    #[must_use]
    pub const fn headers(&self) -> &std::collections::BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl Default for RequestInit {
    fn default() -> Self {
        Self::new("GET")
    }
}

/// An HTTP response as plugins observe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    status: u16,
    #[serde(default)]
    headers: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    body: String,
}

impl HttpResponse {
    /// Creates a response with the given status and an empty body.
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self {
            status,
            headers: std::collections::BTreeMap::new(),
            body: String::new(),
        }
    }

    /// Adds a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Sets the response body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Returns the raw body text.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.body.as_str()
    }

    /// Parses the body as JSON; `None` when empty or malformed.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// HTTP client handed to plugins.
///
/// The host's implementation enforces the manifest's network allowlist and
/// may fail with [`PluginError::Http`]; the testkit's mock resolves every
/// request from an in-memory table and never fails.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Performs one request.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Http`] on transport failure or when the host
    /// denies the URL.
    async fn fetch(
        &self,
        url: &str,
        init: Option<RequestInit>,
    ) -> Result<HttpResponse, PluginError>;
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Plugin-scoped key-value storage.
///
/// The signatures are asynchronous because the host's storage is; the
/// testkit resolves immediately with in-memory data behind the same
/// signatures. Missing keys are `None`/`false`, never errors.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value for `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str);

    /// Removes `key`; a no-op when absent.
    async fn delete(&self, key: &str);

    /// Returns whether `key` is present.
    async fn has(&self, key: &str) -> bool;
}

// ---------------------------------------------------------------------------
// Auth sources
// ---------------------------------------------------------------------------

/// Allowlisted environment-variable reads.
pub trait EnvSource: Send + Sync {
    /// Returns the value of `name`, or `None` when unset or denied.
    fn var(&self, name: &str) -> Option<String>;
}

/// Allowlisted file reads for credential discovery.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Returns the file's text content, or `None` when absent or denied.
    async fn read_text(&self, path: &str) -> Option<String>;

    /// Returns whether the file exists and is readable.
    async fn exists(&self, path: &str) -> bool;

    /// Parses the file as JSON.
    ///
    /// `None` on a missing file or a parse failure; discovery code probes
    /// candidate locations and must not fail on absence.
    async fn read_json(&self, path: &str) -> Option<Value> {
        let text = self.read_text(path).await?;
        serde_json::from_str(&text).ok()
    }
}

/// Lookup into the OpenCode auth store.
#[async_trait]
pub trait OpencodeAuthStore: Send + Sync {
    /// Returns the stored entry for a provider id, or `None` when the
    /// store is absent or has no entry.
    async fn provider_entry(&self, provider_id: &str) -> Option<Value>;
}

/// Operating system family of the executing host.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OsFamily {
    /// Linux and friends.
    Linux,
    /// Apple macOS.
    Macos,
    /// Microsoft Windows.
    Windows,
    /// Anything else.
    Other,
}

/// Static facts about the executing platform.
///
/// Carried as an explicit value rather than probed ambiently inside
/// consumers, so tests can inject a deterministic platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    os: OsFamily,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    home_dir: Option<PathBuf>,
    arch: String,
}

impl PlatformInfo {
    /// Creates platform facts from explicit values.
    #[must_use]
    pub fn new(os: OsFamily, home_dir: Option<PathBuf>, arch: impl Into<String>) -> Self {
        Self {
            os,
            home_dir,
            arch: arch.into(),
        }
    }

    /// Probes the real executing process.
    #[must_use]
    pub fn current() -> Self {
        let os = match std::env::consts::OS {
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::Macos,
            "windows" => OsFamily::Windows,
            _ => OsFamily::Other,
        };
        Self {
            os,
            home_dir: dirs::home_dir(),
            arch: std::env::consts::ARCH.to_owned(),
        }
    }

    /// Returns the OS family.
    #[must_use]
    pub const fn os(&self) -> OsFamily {
        self.os
    }

    /// Returns the home directory, when one exists.
    #[must_use]
    pub fn home_dir(&self) -> Option<&std::path::Path> {
        self.home_dir.as_deref()
    }

    /// Returns the CPU architecture string (`x86_64`, `aarch64`, ...).
    #[must_use]
    pub const fn arch(&self) -> &str {
        self.arch.as_str()
    }
}

/// Everything credential discovery may consult, bundled.
#[derive(Clone)]
pub struct AuthSources {
    env: Arc<dyn EnvSource>,
    files: Arc<dyn FileSource>,
    opencode: Arc<dyn OpencodeAuthStore>,
    platform: PlatformInfo,
}

impl AuthSources {
    /// Bundles the given sources.
    #[must_use]
    pub fn new(
        env: Arc<dyn EnvSource>,
        files: Arc<dyn FileSource>,
        opencode: Arc<dyn OpencodeAuthStore>,
        platform: PlatformInfo,
    ) -> Self {
        Self {
            env,
            files,
            opencode,
            platform,
        }
    }

    /// Returns the environment-variable source.
    #[must_use]
    pub fn env(&self) -> &dyn EnvSource {
        self.env.as_ref()
    }

    /// Returns the file source.
    #[must_use]
    pub fn files(&self) -> &dyn FileSource {
        self.files.as_ref()
    }

    /// Returns the OpenCode auth store.
    #[must_use]
    pub fn opencode(&self) -> &dyn OpencodeAuthStore {
        self.opencode.as_ref()
    }

    /// Returns the platform facts.
    #[must_use]
    pub const fn platform(&self) -> &PlatformInfo {
        &self.platform
    }
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Cooperative cancellation signal carried by every context.
///
/// This package only ever hands out tokens in the unfired state; the host
/// fires them, and long-running plugin work is expected to observe
/// [`CancellationToken::is_cancelled`] between steps.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    fired: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates an unfired token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the token. Called by the host, never by this package.
    pub fn cancel(&self) {
        self.fired.store(true, Ordering::SeqCst);
    }

    /// Returns whether the token has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Context records
// ---------------------------------------------------------------------------

/// The canonical superset context injected into plugin lifecycle calls.
///
/// Narrower method contexts are projections of this record; see
/// [`PluginContext::provider_fetch`] and [`PluginContext::agent_fetch`].
#[derive(Clone)]
pub struct PluginContext {
    config: ConfigValues,
    logger: Arc<dyn PluginLogger>,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn KeyValueStore>,
    auth: AuthSources,
    cancel: CancellationToken,
}

impl PluginContext {
    /// Assembles a context from host-provided capabilities.
    #[must_use]
    pub fn new(
        config: ConfigValues,
        logger: Arc<dyn PluginLogger>,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        auth: AuthSources,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            logger,
            http,
            store,
            auth,
            cancel,
        }
    }

    /// Returns the resolved configuration values.
    #[must_use]
    pub const fn config(&self) -> &ConfigValues {
        &self.config
    }

    /// Returns the logger.
    #[must_use]
    pub fn logger(&self) -> &dyn PluginLogger {
        self.logger.as_ref()
    }

    /// Returns the HTTP client.
    #[must_use]
    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Returns the plugin-scoped key-value store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Returns the credential discovery sources.
    #[must_use]
    pub const fn auth(&self) -> &AuthSources {
        &self.auth
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Projects the narrow context a provider's `fetch_usage` receives:
    /// the given credentials are added, storage and auth sources dropped.
    #[must_use]
    pub fn provider_fetch(&self, credentials: Credentials) -> ProviderFetchContext {
        ProviderFetchContext {
            config: self.config.clone(),
            logger: Arc::clone(&self.logger),
            http: Arc::clone(&self.http),
            cancel: self.cancel.clone(),
            credentials,
        }
    }

    /// Projects the narrow context an agent's `parse_sessions` receives:
    /// no credentials, storage, or auth sources.
    #[must_use]
    pub fn agent_fetch(&self) -> AgentFetchContext {
        AgentFetchContext {
            config: self.config.clone(),
            logger: Arc::clone(&self.logger),
            http: Arc::clone(&self.http),
            cancel: self.cancel.clone(),
        }
    }
}

/// Context for a provider plugin's usage fetch.
#[derive(Clone)]
pub struct ProviderFetchContext {
    config: ConfigValues,
    logger: Arc<dyn PluginLogger>,
    http: Arc<dyn HttpClient>,
    cancel: CancellationToken,
    credentials: Credentials,
}

impl ProviderFetchContext {
    /// Returns the resolved configuration values.
    #[must_use]
    pub const fn config(&self) -> &ConfigValues {
        &self.config
    }

    /// Returns the logger.
    #[must_use]
    pub fn logger(&self) -> &dyn PluginLogger {
        self.logger.as_ref()
    }

    /// Returns the HTTP client.
    #[must_use]
    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Returns the credentials discovered for this provider.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Context for an agent plugin's session-log parse.
#[derive(Clone)]
pub struct AgentFetchContext {
    config: ConfigValues,
    logger: Arc<dyn PluginLogger>,
    http: Arc<dyn HttpClient>,
    cancel: CancellationToken,
}

impl AgentFetchContext {
    /// Returns the resolved configuration values.
    #[must_use]
    pub const fn config(&self) -> &ConfigValues {
        &self.config
    }

    /// Returns the logger.
    #[must_use]
    pub fn logger(&self) -> &dyn PluginLogger {
        self.logger.as_ref()
    }

    /// Returns the HTTP client.
    #[must_use]
    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}
