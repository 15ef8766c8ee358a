//! Plugin contract for the Vigil usage dashboard.
//!
//! The `vigil-plugin-api` crate defines everything a third-party extension
//! and the Vigil host agree on: the data shapes for the four plugin kinds
//! (provider, agent, theme, notification), the capability traits the host
//! injects into plugin calls, credential discovery values, and the
//! factory/validator helpers that admit a plugin into the contract.
//!
//! The crate is deliberately boundary glue. It performs no I/O, spawns
//! nothing, and persists nothing: real HTTP, storage, and file access are
//! the host's responsibility, and in-memory stand-ins for tests live in
//! the companion `vigil-plugin-testkit` crate.
//!
//! # Example
//!
//! ```
//! use vigil_plugin_api::version::CURRENT_CONTRACT_VERSION;
//! use vigil_plugin_api::{PluginKind, PluginManifest, create_provider_plugin};
//!
//! let manifest = PluginManifest::new("replicate", "Replicate", "1.0.0", PluginKind::Provider);
//! let admitted = create_provider_plugin(manifest).expect("valid manifest");
//! assert_eq!(admitted.contract_version(), CURRENT_CONTRACT_VERSION);
//! ```

pub mod config;
pub mod context;
pub mod credentials;
pub mod error;
pub mod factory;
pub mod manifest;
pub mod notification;
pub mod permissions;
pub mod plugin;
pub mod theme;
pub mod usage;
pub mod version;

pub use self::config::{ConfigField, ConfigFieldType, ConfigValues, SelectOption, resolve_config};
pub use self::context::{
    AgentFetchContext, AuthSources, CancellationToken, EnvSource, FileSource, HttpClient,
    HttpResponse, KeyValueStore, LogLevel, OpencodeAuthStore, OsFamily, PlatformInfo,
    PluginContext, PluginLogger, ProviderFetchContext, RequestInit,
};
pub use self::credentials::{
    CredentialFailure, CredentialResult, CredentialSource, Credentials, OAuthCredentials,
    is_token_expired,
};
pub use self::error::{PluginError, Remediation};
pub use self::factory::{
    create_agent_plugin, create_notification_plugin, create_provider_plugin, create_theme_plugin,
};
pub use self::manifest::{PluginKind, PluginManifest, PluginMeta};
pub use self::notification::{NotificationEvent, NotificationKind, NotificationSeverity};
pub use self::permissions::PluginPermissions;
pub use self::plugin::{AgentPlugin, NotificationPlugin, Plugin, ProviderPlugin, ThemePlugin};
pub use self::theme::ThemePalette;
pub use self::usage::{ProviderUsageData, SessionUsageData, TokenUsage};
pub use self::version::{CURRENT_CONTRACT_VERSION, assert_compatible, is_compatible};
