//! The behavioural contracts each plugin kind implements.
//!
//! A plugin is a manifest (see [`crate::manifest`]) plus an implementation
//! of one of the kind traits below. Every kind shares the [`Plugin`]
//! lifecycle, which the host drives in a fixed order:
//!
//! load → validate → `initialize` → `start` → \[runtime calls\] → `stop`
//! → `destroy`, with `on_config_change` invocable at any point after
//! `initialize` when the user edits settings.
//!
//! All lifecycle hooks default to no-ops so plugins only implement the
//! stages they care about.

use async_trait::async_trait;

use crate::config::ConfigValues;
use crate::context::{AgentFetchContext, PluginContext, ProviderFetchContext};
use crate::credentials::CredentialResult;
use crate::error::PluginError;
use crate::manifest::PluginManifest;
use crate::notification::NotificationEvent;
use crate::theme::ThemePalette;
use crate::usage::{ProviderUsageData, SessionUsageData};

/// Lifecycle shared by every plugin kind.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Returns the plugin's stamped manifest.
    fn manifest(&self) -> &PluginManifest;

    /// Called once after the host has validated the manifest.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Lifecycle`] to abort the load.
    async fn initialize(&mut self, _ctx: &PluginContext) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called when the host begins routine operation.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Lifecycle`] to abort the load.
    async fn start(&mut self, _ctx: &PluginContext) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called when the user edits this plugin's settings, any time after
    /// `initialize`.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Lifecycle`] when the new values cannot be
    /// applied; the host keeps the previous configuration.
    async fn on_config_change(
        &mut self,
        _ctx: &PluginContext,
        _new_config: &ConfigValues,
    ) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called when the host suspends routine operation.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Lifecycle`]; the host logs and continues
    /// shutdown.
    async fn stop(&mut self, _ctx: &PluginContext) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called once before the plugin is unloaded.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Lifecycle`]; the host logs and continues
    /// unload.
    async fn destroy(&mut self, _ctx: &PluginContext) -> Result<(), PluginError> {
        Ok(())
    }
}

/// A plugin that fetches usage data from an AI provider's API.
#[async_trait]
pub trait ProviderPlugin: Plugin {
    /// Locates credentials for this provider.
    ///
    /// "No credentials yet" is an ordinary outcome, so the return is a
    /// plain [`CredentialResult`], never an `Err`.
    async fn discover_credentials(&self, ctx: &PluginContext) -> CredentialResult;

    /// Fetches one usage snapshot with previously discovered credentials.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError`] when the provider API cannot be reached or
    /// answers with something unusable.
    async fn fetch_usage(
        &self,
        ctx: &ProviderFetchContext,
    ) -> Result<ProviderUsageData, PluginError>;
}

/// A plugin that parses usage records out of a coding agent's local
/// session logs.
#[async_trait]
pub trait AgentPlugin: Plugin {
    /// Parses session logs into a flat ordered sequence of records.
    ///
    /// The host aggregates; this method only parses.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError`] when the log location is unreadable in a
    /// way that is not plain absence.
    async fn parse_sessions(
        &self,
        ctx: &AgentFetchContext,
    ) -> Result<Vec<SessionUsageData>, PluginError>;
}

/// A plugin that supplies a dashboard colour palette.
pub trait ThemePlugin: Plugin {
    /// Returns the palette this theme renders with.
    fn palette(&self) -> ThemePalette;
}

/// A plugin that delivers notification events to an external channel.
#[async_trait]
pub trait NotificationPlugin: Plugin {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError`] when delivery fails; the host decides
    /// whether to retry.
    async fn notify(
        &self,
        ctx: &PluginContext,
        event: &NotificationEvent,
    ) -> Result<(), PluginError>;
}
