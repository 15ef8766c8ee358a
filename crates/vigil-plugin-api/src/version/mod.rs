//! Contract-version compatibility checks.
//!
//! Every plugin carries the integer contract version it was built against,
//! stamped by the factory helpers in [`crate::factory`]. The host compares
//! that integer against [`CURRENT_CONTRACT_VERSION`] before loading a
//! plugin. The check is exact equality: there is no forward or backward
//! tolerance, because the contract shapes themselves are versioned as a
//! unit.

use crate::error::{PluginError, Remediation};

/// The contract version this package defines.
///
/// Distinct from the plugin's own semantic version string; this integer
/// identifies the shape of the plugin interface itself.
pub const CURRENT_CONTRACT_VERSION: u32 = 1;

/// Returns `true` iff `declared` equals [`CURRENT_CONTRACT_VERSION`].
///
/// # Example
///
/// ```
/// use vigil_plugin_api::version::{CURRENT_CONTRACT_VERSION, is_compatible};
///
/// assert!(is_compatible(CURRENT_CONTRACT_VERSION));
/// assert!(!is_compatible(CURRENT_CONTRACT_VERSION + 1));
/// ```
#[must_use]
pub const fn is_compatible(declared: u32) -> bool {
    declared == CURRENT_CONTRACT_VERSION
}

/// Fails with [`PluginError::IncompatibleVersion`] when `declared` does not
/// match [`CURRENT_CONTRACT_VERSION`].
///
/// The error message names the plugin, both version integers, and the
/// remediation direction: "upgrade the plugin" when the plugin is older
/// than the host, "upgrade the host" when it is newer.
///
/// # Errors
///
/// Returns [`PluginError::IncompatibleVersion`] on any mismatch.
pub fn assert_compatible(plugin_id: &str, declared: u32) -> Result<(), PluginError> {
    if is_compatible(declared) {
        return Ok(());
    }
    let remediation = if declared < CURRENT_CONTRACT_VERSION {
        Remediation::UpgradePlugin
    } else {
        Remediation::UpgradeHost
    };
    Err(PluginError::IncompatibleVersion {
        plugin_id: plugin_id.to_owned(),
        declared,
        supported: CURRENT_CONTRACT_VERSION,
        remediation,
    })
}

#[cfg(test)]
mod tests;
