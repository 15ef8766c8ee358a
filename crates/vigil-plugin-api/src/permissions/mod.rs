//! Capability requests a plugin declares in its manifest.
//!
//! Absence of a block means the capability is denied. The allowlists inside
//! each block are closed sets; the host interprets and enforces them, this
//! package only carries the declaration.

use serde::{Deserialize, Serialize};

/// Outbound network access request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPermissions {
    enabled: bool,
    #[serde(default)]
    allowed_domains: Vec<String>,
}

impl NetworkPermissions {
    /// Requests network access with an empty domain allowlist.
    #[must_use]
    pub const fn enabled() -> Self {
        Self {
            enabled: true,
            allowed_domains: Vec::new(),
        }
    }

    /// Adds a domain to the allowlist.
    #[must_use]
    pub fn allow_domain(mut self, domain: impl Into<String>) -> Self {
        self.allowed_domains.push(domain.into());
        self
    }

    /// Returns whether network access is requested at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the domains the plugin asks to reach.
    #[must_use]
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }
}

/// Filesystem access request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesystemPermissions {
    #[serde(default)]
    read: bool,
    #[serde(default)]
    write: bool,
    #[serde(default)]
    paths: Vec<String>,
}

impl FilesystemPermissions {
    /// Requests read-only access to the given paths.
    #[must_use]
    pub fn read_only(paths: Vec<String>) -> Self {
        Self {
            read: true,
            write: false,
            paths,
        }
    }

    /// Requests read-write access to the given paths.
    #[must_use]
    pub fn read_write(paths: Vec<String>) -> Self {
        Self {
            read: true,
            write: true,
            paths,
        }
    }

    /// Returns whether read access is requested.
    #[must_use]
    pub const fn can_read(&self) -> bool {
        self.read
    }

    /// Returns whether write access is requested.
    #[must_use]
    pub const fn can_write(&self) -> bool {
        self.write
    }

    /// Returns the paths the plugin asks to touch.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

/// Environment-variable access request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvPermissions {
    #[serde(default)]
    read: bool,
    #[serde(default)]
    vars: Vec<String>,
}

impl EnvPermissions {
    /// Requests read access to the named variables.
    #[must_use]
    pub fn read(vars: Vec<String>) -> Self {
        Self { read: true, vars }
    }

    /// Returns whether variable reads are requested.
    #[must_use]
    pub const fn can_read(&self) -> bool {
        self.read
    }

    /// Returns the variable names the plugin asks to read.
    #[must_use]
    pub fn vars(&self) -> &[String] {
        &self.vars
    }
}

/// Desktop integration request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPermissions {
    #[serde(default)]
    notifications: bool,
    #[serde(default)]
    clipboard: bool,
}

impl SystemPermissions {
    /// Creates a request with both integrations denied.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            notifications: false,
            clipboard: false,
        }
    }

    /// Requests permission to post desktop notifications.
    #[must_use]
    pub const fn with_notifications(mut self) -> Self {
        self.notifications = true;
        self
    }

    /// Requests clipboard access.
    #[must_use]
    pub const fn with_clipboard(mut self) -> Self {
        self.clipboard = true;
        self
    }

    /// Returns whether desktop notifications are requested.
    #[must_use]
    pub const fn notifications(&self) -> bool {
        self.notifications
    }

    /// Returns whether clipboard access is requested.
    #[must_use]
    pub const fn clipboard(&self) -> bool {
        self.clipboard
    }
}

/// The full set of capability requests in a manifest.
///
/// The default value denies everything; each `with_*` builder opts one
/// capability block in.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::permissions::{NetworkPermissions, PluginPermissions};
///
/// let permissions = PluginPermissions::default()
///     .with_network(NetworkPermissions::enabled().allow_domain("api.replicate.com"));
/// assert!(permissions.network().is_some());
/// assert!(permissions.filesystem().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginPermissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    network: Option<NetworkPermissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filesystem: Option<FilesystemPermissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    env: Option<EnvPermissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system: Option<SystemPermissions>,
}

impl PluginPermissions {
    /// Requests network access.
    #[must_use]
    pub fn with_network(mut self, network: NetworkPermissions) -> Self {
        self.network = Some(network);
        self
    }

    /// Requests filesystem access.
    #[must_use]
    pub fn with_filesystem(mut self, filesystem: FilesystemPermissions) -> Self {
        self.filesystem = Some(filesystem);
        self
    }

    /// Requests environment-variable access.
    #[must_use]
    pub fn with_env(mut self, env: EnvPermissions) -> Self {
        self.env = Some(env);
        self
    }

    /// Requests desktop integration.
    #[must_use]
    pub const fn with_system(mut self, system: SystemPermissions) -> Self {
        self.system = Some(system);
        self
    }

    /// Returns the network request, if present.
    #[must_use]
    pub const fn network(&self) -> Option<&NetworkPermissions> {
        self.network.as_ref()
    }

    /// Returns the filesystem request, if present.
    #[must_use]
    pub const fn filesystem(&self) -> Option<&FilesystemPermissions> {
        self.filesystem.as_ref()
    }

    /// Returns the environment-variable request, if present.
    #[must_use]
    pub const fn env(&self) -> Option<&EnvPermissions> {
        self.env.as_ref()
    }

    /// Returns the desktop integration request, if present.
    #[must_use]
    pub const fn system(&self) -> Option<&SystemPermissions> {
        self.system.as_ref()
    }
}
