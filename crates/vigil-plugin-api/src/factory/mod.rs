//! Factory helpers that admit a manifest into the contract.
//!
//! One constructor per plugin kind. Each runs the shared identity
//! validation, checks the kind discriminator matches the factory, and
//! returns the manifest with the contract version stamped to
//! [`CURRENT_CONTRACT_VERSION`] — overriding any caller-supplied value, so
//! plugin authors never manage that field themselves.

use crate::error::PluginError;
use crate::manifest::{PluginKind, PluginManifest};
use crate::version::CURRENT_CONTRACT_VERSION;

fn create_plugin(
    manifest: PluginManifest,
    expected: PluginKind,
    factory: &str,
) -> Result<PluginManifest, PluginError> {
    manifest.validate()?;
    if manifest.kind() != expected {
        return Err(PluginError::validation(
            "kind",
            format!(
                "{factory} requires kind '{expected}', got '{}'",
                manifest.kind()
            ),
        ));
    }
    tracing::debug!(
        id = manifest.id(),
        kind = %expected,
        contract_version = CURRENT_CONTRACT_VERSION,
        "admitted plugin manifest"
    );
    Ok(manifest.stamp_contract_version(CURRENT_CONTRACT_VERSION))
}

/// Admits a provider plugin manifest.
///
/// # Errors
///
/// Returns [`PluginError::Validation`] when an identity field fails the
/// shared rules or the kind is not [`PluginKind::Provider`].
pub fn create_provider_plugin(manifest: PluginManifest) -> Result<PluginManifest, PluginError> {
    create_plugin(manifest, PluginKind::Provider, "create_provider_plugin")
}

/// Admits an agent plugin manifest.
///
/// # Errors
///
/// Returns [`PluginError::Validation`] when an identity field fails the
/// shared rules or the kind is not [`PluginKind::Agent`].
pub fn create_agent_plugin(manifest: PluginManifest) -> Result<PluginManifest, PluginError> {
    create_plugin(manifest, PluginKind::Agent, "create_agent_plugin")
}

/// Admits a theme plugin manifest.
///
/// # Errors
///
/// Returns [`PluginError::Validation`] when an identity field fails the
/// shared rules or the kind is not [`PluginKind::Theme`].
pub fn create_theme_plugin(manifest: PluginManifest) -> Result<PluginManifest, PluginError> {
    create_plugin(manifest, PluginKind::Theme, "create_theme_plugin")
}

/// Admits a notification plugin manifest.
///
/// # Errors
///
/// Returns [`PluginError::Validation`] when an identity field fails the
/// shared rules or the kind is not [`PluginKind::Notification`].
pub fn create_notification_plugin(
    manifest: PluginManifest,
) -> Result<PluginManifest, PluginError> {
    create_plugin(
        manifest,
        PluginKind::Notification,
        "create_notification_plugin",
    )
}
