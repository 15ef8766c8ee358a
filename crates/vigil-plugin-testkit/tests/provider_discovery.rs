//! End-to-end exercise of a provider plugin against the harness: manifest
//! admission, credential discovery through the injected auth sources, and
//! a usage fetch through the mock HTTP client.

use async_trait::async_trait;
use serde_json::json;
use vigil_plugin_api::context::{PluginContext, ProviderFetchContext};
use vigil_plugin_api::credentials::{CredentialFailure, CredentialResult, Credentials};
use vigil_plugin_api::error::PluginError;
use vigil_plugin_api::factory::create_provider_plugin;
use vigil_plugin_api::manifest::{PluginKind, PluginManifest};
use vigil_plugin_api::plugin::{Plugin, ProviderPlugin};
use vigil_plugin_api::usage::{ProviderUsageData, UsageLimits};
use vigil_plugin_api::version::CURRENT_CONTRACT_VERSION;
use vigil_plugin_testkit::{MockResponse, TestContextOptions, create_test_context};

const KEY_VAR: &str = "REPLICATE_API_TOKEN";
const USAGE_URL: &str = "https://api.replicate.com/v1/account/usage";

/// A provider that reads its key from one environment variable and fetches
/// a usage snapshot from a single endpoint.
struct ReplicateProvider {
    manifest: PluginManifest,
}

impl ReplicateProvider {
    fn new() -> Result<Self, PluginError> {
        let manifest = create_provider_plugin(PluginManifest::new(
            "replicate",
            "Replicate",
            "1.0.0",
            PluginKind::Provider,
        ))?;
        Ok(Self { manifest })
    }
}

#[async_trait]
impl Plugin for ReplicateProvider {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }
}

#[async_trait]
impl ProviderPlugin for ReplicateProvider {
    async fn discover_credentials(&self, ctx: &PluginContext) -> CredentialResult {
        match ctx.auth().env().var(KEY_VAR) {
            Some(key) => CredentialResult::found(Credentials::api_key(key)),
            None => CredentialResult::missing().with_message(format!("{KEY_VAR} is not set")),
        }
    }

    async fn fetch_usage(
        &self,
        ctx: &ProviderFetchContext,
    ) -> Result<ProviderUsageData, PluginError> {
        let response = ctx.http().fetch(USAGE_URL, None).await?;
        let body = response.json().ok_or_else(|| PluginError::Http {
            url: USAGE_URL.to_owned(),
            message: format!("status {} with a non-JSON body", response.status()),
        })?;
        let mut limits = UsageLimits::new();
        if let Some(used) = body.get("used").and_then(serde_json::Value::as_f64) {
            limits = limits.with_used(used);
        }
        if let Some(limit) = body.get("limit").and_then(serde_json::Value::as_f64) {
            limits = limits.with_limit(limit);
        }
        Ok(ProviderUsageData::new(1_700_000_000_000).with_limits(limits))
    }
}

#[tokio::test]
async fn discovery_reports_missing_when_the_env_var_is_unset() {
    let plugin = ReplicateProvider::new().expect("manifest is valid");
    let harness = create_test_context(TestContextOptions::new()).expect("no schema to violate");

    let result = plugin.discover_credentials(harness.context()).await;
    assert!(!result.is_found());
    assert_eq!(result.reason(), Some(CredentialFailure::Missing));
    assert_eq!(result.message(), Some("REPLICATE_API_TOKEN is not set"));
}

#[tokio::test]
async fn discovery_finds_the_key_seeded_into_the_env_source() {
    let plugin = ReplicateProvider::new().expect("manifest is valid");
    let options = TestContextOptions::new().with_env_var(KEY_VAR, "r8_test");
    let harness = create_test_context(options).expect("no schema to violate");

    let result = plugin.discover_credentials(harness.context()).await;
    let credentials = result.credentials().expect("key is set");
    assert_eq!(credentials.api_key_value(), Some("r8_test"));
}

#[tokio::test]
async fn fetch_usage_reads_the_routed_snapshot() {
    let plugin = ReplicateProvider::new().expect("manifest is valid");
    let options = TestContextOptions::new()
        .with_route(USAGE_URL, MockResponse::ok(json!({"used": 120, "limit": 500})));
    let harness = create_test_context(options).expect("no schema to violate");

    let ctx = harness.provider_fetch(Credentials::api_key("r8_test"));
    let usage = plugin.fetch_usage(&ctx).await.expect("route is registered");
    let limits = usage.limits().expect("snapshot carries limits");
    assert_eq!(limits.used(), Some(120.0));
    assert_eq!(limits.limit(), Some(500.0));

    let calls = harness.http().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls.first().map(vigil_plugin_testkit::RecordedCall::url), Some(USAGE_URL));
}

#[tokio::test]
async fn fetch_usage_surfaces_a_non_json_answer_as_an_http_error() {
    let plugin = ReplicateProvider::new().expect("manifest is valid");
    let harness = create_test_context(TestContextOptions::new()).expect("no schema to violate");

    let ctx = harness.provider_fetch(Credentials::api_key("r8_test"));
    let error = plugin.fetch_usage(&ctx).await.expect_err("no route registered");
    assert!(matches!(error, PluginError::Http { .. }));
}

#[test]
fn admission_stamps_the_contract_version_over_any_declared_value() {
    let manifest: PluginManifest = serde_json::from_value(json!({
        "id": "replicate",
        "name": "Replicate",
        "version": "1.0.0",
        "kind": "provider",
        "contract_version": 99
    }))
    .expect("shape matches the manifest");
    let admitted = create_provider_plugin(manifest).expect("manifest is valid");
    assert_eq!(admitted.contract_version(), CURRENT_CONTRACT_VERSION);
}

#[test]
fn admission_rejects_a_manifest_of_another_kind() {
    let manifest = PluginManifest::new("dracula", "Dracula", "1.0.0", PluginKind::Theme);
    let error = create_provider_plugin(manifest).expect_err("kind mismatch");
    assert!(matches!(error, PluginError::Validation { .. }));
}
