//! Plugin manifest types describing identity, metadata, and configuration.
//!
//! A [`PluginManifest`] is the declarative half of a plugin: its kebab-case
//! id, display name, semantic version, kind discriminator, capability
//! requests, and optional config schema. The behavioural half is one of the
//! traits in [`crate::plugin`]. Manifests are validated by the factory
//! helpers in [`crate::factory`] before the host will touch the plugin.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::{ConfigField, ConfigValues};
use crate::error::PluginError;
use crate::permissions::PluginPermissions;

/// Category of a plugin within the Vigil ecosystem.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::PluginKind;
///
/// let kind = PluginKind::Provider;
/// assert_eq!(kind.as_str(), "provider");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PluginKind {
    /// Fetches usage and quota data from an AI provider's API.
    Provider,
    /// Parses usage records out of a coding agent's local session logs.
    Agent,
    /// Supplies a colour palette for the dashboard.
    Theme,
    /// Delivers notification events to an external channel.
    Notification,
}

impl PluginKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Agent => "agent",
            Self::Theme => "theme",
            Self::Notification => "notification",
        }
    }
}

/// Optional descriptive metadata attached to a plugin.
///
/// Every field is omitted from serialization when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    license: Option<String>,
}

impl PluginMeta {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the one-line plugin description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the author name or organisation.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the project homepage URL.
    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// Sets the SPDX license expression.
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the author, if any.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Returns the homepage, if any.
    #[must_use]
    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    /// Returns the license, if any.
    #[must_use]
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }
}

/// Declarative description of a plugin's identity and capability requests.
///
/// Construct with [`PluginManifest::new`] and the `with_*` builders, then
/// pass through the matching factory helper in [`crate::factory`], which
/// validates the identity fields and stamps the contract version.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::{PluginKind, PluginManifest};
///
/// let manifest = PluginManifest::new("replicate", "Replicate", "1.0.0", PluginKind::Provider);
/// assert_eq!(manifest.id(), "replicate");
/// assert!(manifest.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    id: String,
    name: String,
    version: String,
    kind: PluginKind,
    #[serde(default)]
    contract_version: u32,
    #[serde(default)]
    meta: PluginMeta,
    #[serde(default)]
    permissions: PluginPermissions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config_schema: Option<BTreeMap<String, ConfigField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_config: Option<ConfigValues>,
}

impl PluginManifest {
    /// Creates a manifest with empty metadata and all capabilities denied.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        kind: PluginKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            kind,
            contract_version: 0,
            meta: PluginMeta::default(),
            permissions: PluginPermissions::default(),
            config_schema: None,
            default_config: None,
        }
    }

    /// Attaches descriptive metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: PluginMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Declares the capabilities this plugin requests from the host.
    #[must_use]
    pub fn with_permissions(mut self, permissions: PluginPermissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Declares the user-configurable settings this plugin exposes.
    #[must_use]
    pub fn with_config_schema(mut self, schema: BTreeMap<String, ConfigField>) -> Self {
        self.config_schema = Some(schema);
        self
    }

    /// Supplies default values for the config schema.
    #[must_use]
    pub fn with_default_config(mut self, config: ConfigValues) -> Self {
        self.default_config = Some(config);
        self
    }

    pub(crate) fn stamp_contract_version(mut self, contract_version: u32) -> Self {
        self.contract_version = contract_version;
        self
    }

    /// Validates the shared identity fields.
    ///
    /// The id must be kebab-case (`^[a-z][a-z0-9-]*$`), the name non-empty,
    /// and the version must carry a leading `MAJOR.MINOR.PATCH` numeric
    /// prefix. Anything after the three numeric groups is accepted, so
    /// pre-release and build suffixes such as `-beta.1` pass.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Validation`] naming the field and the exact
    /// rule that was broken.
    pub fn validate(&self) -> Result<(), PluginError> {
        validate_id(&self.id)?;
        if self.name.trim().is_empty() {
            return Err(PluginError::validation("name", "must not be empty"));
        }
        validate_version(&self.version)
    }

    /// Returns the kebab-case plugin identifier.
    #[must_use]
    pub const fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the human-readable plugin name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the plugin's own semantic version string.
    #[must_use]
    pub const fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Returns the plugin category.
    #[must_use]
    pub const fn kind(&self) -> PluginKind {
        self.kind
    }

    /// Returns the contract version stamped by the factory helpers.
    ///
    /// Zero until a factory has stamped the manifest.
    #[must_use]
    pub const fn contract_version(&self) -> u32 {
        self.contract_version
    }

    /// Returns the descriptive metadata.
    #[must_use]
    pub const fn meta(&self) -> &PluginMeta {
        &self.meta
    }

    /// Returns the declared capability requests.
    #[must_use]
    pub const fn permissions(&self) -> &PluginPermissions {
        &self.permissions
    }

    /// Returns the config schema, if the plugin exposes settings.
    #[must_use]
    pub const fn config_schema(&self) -> Option<&BTreeMap<String, ConfigField>> {
        self.config_schema.as_ref()
    }

    /// Returns the default config values, if supplied.
    #[must_use]
    pub const fn default_config(&self) -> Option<&ConfigValues> {
        self.default_config.as_ref()
    }
}

fn validate_id(id: &str) -> Result<(), PluginError> {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return Err(PluginError::validation("id", "must not be empty"));
    };
    if !first.is_ascii_lowercase() {
        return Err(PluginError::validation(
            "id",
            format!("must start with a lowercase letter, got '{first}'"),
        ));
    }
    if let Some(bad) = chars.find(|c| !is_kebab_char(*c)) {
        return Err(PluginError::validation(
            "id",
            format!("contains '{bad}'; only lowercase letters, digits, and hyphens are allowed"),
        ));
    }
    Ok(())
}

const fn is_kebab_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

fn validate_version(version: &str) -> Result<(), PluginError> {
    if version.is_empty() {
        return Err(PluginError::validation("version", "must not be empty"));
    }
    if !has_semver_prefix(version) {
        return Err(PluginError::validation(
            "version",
            format!("must start with a MAJOR.MINOR.PATCH numeric prefix, got '{version}'"),
        ));
    }
    Ok(())
}

// Prefix match only: suffixes after the third numeric group are accepted,
// matching the contract's documented leniency.
fn has_semver_prefix(version: &str) -> bool {
    let mut chars = version.chars().peekable();
    for group in 0_u8..3 {
        let mut digits = 0_u32;
        while chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
            digits += 1;
        }
        if digits == 0 {
            return false;
        }
        if group < 2 && chars.next() != Some('.') {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests;
