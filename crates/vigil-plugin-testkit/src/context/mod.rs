//! Context factories assembling full or narrowed test contexts.
//!
//! [`create_test_context`] builds a [`PluginContext`] that is structurally
//! identical to the one the real host injects, but with every capability
//! backed by an in-memory table from [`TestContextOptions`]. The returned
//! [`TestContext`] keeps concrete handles to the mocks so tests can
//! inspect recorded log lines, HTTP calls, and store contents.
//!
//! The narrower factories derive their shapes through the projection
//! methods on [`PluginContext`], never by re-assembling fields, so they
//! cannot drift from the host's definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use vigil_plugin_api::config::{ConfigField, ConfigValues, resolve_config};
use vigil_plugin_api::context::{
    AgentFetchContext, AuthSources, CancellationToken, EnvSource, FileSource, HttpClient,
    KeyValueStore, OpencodeAuthStore, PlatformInfo, PluginContext, PluginLogger,
    ProviderFetchContext,
};
use vigil_plugin_api::credentials::Credentials;
use vigil_plugin_api::error::PluginError;

use crate::http::{MockHttpClient, MockResponse};
use crate::logger::MockLogger;
use crate::store::MockStore;

/// An [`EnvSource`] reading from a fixed name→value table.
#[derive(Debug, Default)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Creates a source over the given table.
    #[must_use]
    pub const fn new(vars: BTreeMap<String, String>) -> Self {
        Self { vars }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// A [`FileSource`] reading from a fixed path→content table.
///
/// `read_json` inherits the trait default: `None` on a missing path or a
/// parse failure, never an error.
#[derive(Debug, Default)]
pub struct MapFiles {
    files: BTreeMap<String, String>,
}

impl MapFiles {
    /// Creates a source over the given table.
    #[must_use]
    pub const fn new(files: BTreeMap<String, String>) -> Self {
        Self { files }
    }
}

#[async_trait]
impl FileSource for MapFiles {
    async fn read_text(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }

    async fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

/// An [`OpencodeAuthStore`] with no entries.
///
/// The harness has no real external auth store to consult, so every
/// lookup resolves to `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOpencodeStore;

#[async_trait]
impl OpencodeAuthStore for NullOpencodeStore {
    async fn provider_entry(&self, _provider_id: &str) -> Option<Value> {
        None
    }
}

/// Inputs for [`create_test_context`].
///
/// Everything defaults to empty: no config, no routes, no store entries,
/// no env vars, no files, the real platform probe, and a 404 for
/// unmatched URLs.
#[derive(Debug, Default)]
pub struct TestContextOptions {
    config: ConfigValues,
    config_schema: Option<BTreeMap<String, ConfigField>>,
    routes: BTreeMap<String, MockResponse>,
    default_status: Option<u16>,
    store_entries: BTreeMap<String, String>,
    env_vars: BTreeMap<String, String>,
    files: BTreeMap<String, String>,
    platform: Option<PlatformInfo>,
}

impl TestContextOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies one config value.
    #[must_use]
    pub fn with_config_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }

    /// Supplies a config schema; the context's config is then resolved
    /// against it (defaults filled, values validated).
    #[must_use]
    pub fn with_config_schema(mut self, schema: BTreeMap<String, ConfigField>) -> Self {
        self.config_schema = Some(schema);
        self
    }

    /// Registers a canned HTTP response for an exact URL.
    #[must_use]
    pub fn with_route(mut self, url: impl Into<String>, response: MockResponse) -> Self {
        self.routes.insert(url.into(), response);
        self
    }

    /// Overrides the HTTP status for unmatched URLs.
    #[must_use]
    pub const fn with_default_status(mut self, status: u16) -> Self {
        self.default_status = Some(status);
        self
    }

    /// Seeds the mock store with one entry.
    #[must_use]
    pub fn with_store_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.store_entries.insert(key.into(), value.into());
        self
    }

    /// Supplies one environment variable visible to `env.var`.
    #[must_use]
    pub fn with_env_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(name.into(), value.into());
        self
    }

    /// Supplies one readable file visible to the file source.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Overrides the platform facts; defaults to the real probe.
    #[must_use]
    pub fn with_platform(mut self, platform: PlatformInfo) -> Self {
        self.platform = Some(platform);
        self
    }
}

/// A full test context plus handles to its mocks.
pub struct TestContext {
    context: PluginContext,
    logger: Arc<MockLogger>,
    http: Arc<MockHttpClient>,
    store: Arc<MockStore>,
}

// PluginContext holds trait objects, so derive is unavailable; render the
// mock handles instead.
impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("logger", &self.logger)
            .field("http", &self.http)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl TestContext {
    /// Returns the assembled context, shaped exactly like the host's.
    #[must_use]
    pub const fn context(&self) -> &PluginContext {
        &self.context
    }

    /// Returns the capturing logger for assertions.
    #[must_use]
    pub fn logger(&self) -> &MockLogger {
        self.logger.as_ref()
    }

    /// Returns the mock HTTP client for call-record assertions.
    #[must_use]
    pub fn http(&self) -> &MockHttpClient {
        self.http.as_ref()
    }

    /// Returns the mock store for content assertions.
    #[must_use]
    pub fn store(&self) -> &MockStore {
        self.store.as_ref()
    }

    /// Projects the provider fetch shape from the assembled context.
    #[must_use]
    pub fn provider_fetch(&self, credentials: Credentials) -> ProviderFetchContext {
        self.context.provider_fetch(credentials)
    }

    /// Projects the agent fetch shape from the assembled context.
    #[must_use]
    pub fn agent_fetch(&self) -> AgentFetchContext {
        self.context.agent_fetch()
    }
}

/// Assembles a full [`PluginContext`] from in-memory tables.
///
/// The cancellation token is fresh and unfired; the auth sources read
/// from the supplied env/file tables; the OpenCode store always resolves
/// to `None`; the platform defaults to the real executing process.
///
/// # Errors
///
/// Returns [`PluginError::Validation`] when a config schema was supplied
/// and the config values fail resolution against it.
pub fn create_test_context(options: TestContextOptions) -> Result<TestContext, PluginError> {
    let config = match &options.config_schema {
        Some(schema) => resolve_config(schema, &options.config)?,
        None => options.config,
    };

    let logger = Arc::new(MockLogger::new());
    let mut http_client = MockHttpClient::new().with_routes(options.routes);
    if let Some(status) = options.default_status {
        http_client = http_client.with_default_status(status);
    }
    let http = Arc::new(http_client);
    let store = Arc::new(MockStore::seeded(options.store_entries));

    let auth = AuthSources::new(
        Arc::new(MapEnv::new(options.env_vars)),
        Arc::new(MapFiles::new(options.files)),
        Arc::new(NullOpencodeStore),
        options.platform.unwrap_or_else(PlatformInfo::current),
    );

    let context = PluginContext::new(
        config,
        Arc::clone(&logger) as Arc<dyn PluginLogger>,
        Arc::clone(&http) as Arc<dyn HttpClient>,
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
        auth,
        CancellationToken::new(),
    );

    Ok(TestContext {
        context,
        logger,
        http,
        store,
    })
}

/// Assembles the narrow context a provider's `fetch_usage` receives.
///
/// # Errors
///
/// Returns [`PluginError::Validation`] under the same conditions as
/// [`create_test_context`].
pub fn create_test_provider_fetch_context(
    credentials: Credentials,
    options: TestContextOptions,
) -> Result<ProviderFetchContext, PluginError> {
    let harness = create_test_context(options)?;
    Ok(harness.provider_fetch(credentials))
}

/// Assembles the narrow context an agent's `parse_sessions` receives.
///
/// # Errors
///
/// Returns [`PluginError::Validation`] under the same conditions as
/// [`create_test_context`].
pub fn create_test_agent_fetch_context(
    options: TestContextOptions,
) -> Result<AgentFetchContext, PluginError> {
    let harness = create_test_context(options)?;
    Ok(harness.agent_fetch())
}
