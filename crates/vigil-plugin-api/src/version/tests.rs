//! Unit tests for contract-version compatibility checks.

use rstest::rstest;

use super::*;

#[test]
fn current_version_is_compatible() {
    assert!(is_compatible(CURRENT_CONTRACT_VERSION));
}

#[rstest]
#[case::older(CURRENT_CONTRACT_VERSION - 1)]
#[case::newer(CURRENT_CONTRACT_VERSION + 1)]
fn neighbouring_versions_are_incompatible(#[case] declared: u32) {
    assert!(!is_compatible(declared));
}

#[test]
fn assert_compatible_accepts_exact_match() {
    assert!(assert_compatible("replicate", CURRENT_CONTRACT_VERSION).is_ok());
}

#[test]
fn older_plugin_is_told_to_upgrade_the_plugin() {
    let error = assert_compatible("replicate", CURRENT_CONTRACT_VERSION - 1)
        .expect_err("older contract should be rejected");
    let message = error.to_string();
    assert!(
        message.contains("replicate"),
        "expected id in message: {message}"
    );
    assert!(
        message.contains("upgrade the plugin"),
        "expected plugin remediation in message: {message}"
    );
}

#[test]
fn newer_plugin_is_told_to_upgrade_the_host() {
    let error = assert_compatible("replicate", CURRENT_CONTRACT_VERSION + 1)
        .expect_err("newer contract should be rejected");
    let message = error.to_string();
    assert!(
        message.contains("replicate"),
        "expected id in message: {message}"
    );
    assert!(
        message.contains("upgrade the host"),
        "expected host remediation in message: {message}"
    );
}

#[test]
fn mismatch_error_carries_structured_versions() {
    let error = assert_compatible("replicate", CURRENT_CONTRACT_VERSION + 3)
        .expect_err("mismatch should be rejected");
    match error {
        crate::error::PluginError::IncompatibleVersion {
            declared,
            supported,
            ..
        } => {
            assert_eq!(declared, CURRENT_CONTRACT_VERSION + 3);
            assert_eq!(supported, CURRENT_CONTRACT_VERSION);
        }
        other => panic!("expected IncompatibleVersion, got {other}"),
    }
}
