//! Unit tests for plugin manifest types.

use std::collections::BTreeMap;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::config::ConfigField;
use crate::permissions::{NetworkPermissions, PluginPermissions};

// ---------------------------------------------------------------------------
// PluginKind
// ---------------------------------------------------------------------------

#[rstest]
#[case::provider(PluginKind::Provider, "provider")]
#[case::agent(PluginKind::Agent, "agent")]
#[case::theme(PluginKind::Theme, "theme")]
#[case::notification(PluginKind::Notification, "notification")]
fn kind_as_str(#[case] kind: PluginKind, #[case] expected: &str) {
    assert_eq!(kind.as_str(), expected);
    assert_eq!(kind.to_string(), expected);
}

#[rstest]
#[case::provider("\"provider\"", PluginKind::Provider)]
#[case::notification("\"notification\"", PluginKind::Notification)]
fn kind_serde_round_trip(#[case] json: &str, #[case] expected: PluginKind) {
    let parsed: PluginKind = serde_json::from_str(json).expect("deserialise");
    assert_eq!(parsed, expected);
    let back = serde_json::to_string(&parsed).expect("serialise");
    assert_eq!(back, json);
}

#[test]
fn kind_parses_from_text() {
    let kind: PluginKind = "agent".parse().expect("parse");
    assert_eq!(kind, PluginKind::Agent);
}

// ---------------------------------------------------------------------------
// PluginManifest construction
// ---------------------------------------------------------------------------

fn make_manifest() -> PluginManifest {
    PluginManifest::new("replicate", "Replicate", "1.0.0", PluginKind::Provider)
}

#[test]
fn new_manifest_has_defaults() {
    let m = make_manifest();
    assert_eq!(m.id(), "replicate");
    assert_eq!(m.name(), "Replicate");
    assert_eq!(m.version(), "1.0.0");
    assert_eq!(m.kind(), PluginKind::Provider);
    assert_eq!(m.contract_version(), 0);
    assert_eq!(m.meta(), &PluginMeta::default());
    assert!(m.config_schema().is_none());
    assert!(m.default_config().is_none());
}

#[test]
fn builders_attach_optional_sections() {
    let mut schema = BTreeMap::new();
    schema.insert("region".to_owned(), ConfigField::string("Region"));
    let mut defaults = BTreeMap::new();
    defaults.insert("region".to_owned(), json!("us-east-1"));

    let m = make_manifest()
        .with_meta(PluginMeta::new().with_author("Acme"))
        .with_permissions(
            PluginPermissions::default()
                .with_network(NetworkPermissions::enabled().allow_domain("api.replicate.com")),
        )
        .with_config_schema(schema)
        .with_default_config(defaults);

    assert_eq!(m.meta().author(), Some("Acme"));
    assert!(m.permissions().network().is_some());
    assert!(m.config_schema().is_some_and(|s| s.contains_key("region")));
    assert!(
        m.default_config()
            .is_some_and(|c| c.contains_key("region"))
    );
}

#[test]
fn meta_omits_absent_fields_from_serialization() {
    let meta = PluginMeta::new().with_description("usage provider");
    let json = serde_json::to_value(&meta).expect("serialise");
    let object = json.as_object().expect("object");
    assert!(object.contains_key("description"));
    assert!(!object.contains_key("author"));
    assert!(!object.contains_key("homepage"));
    assert!(!object.contains_key("license"));
}

// ---------------------------------------------------------------------------
// Identity validation
// ---------------------------------------------------------------------------

#[rstest]
#[case::single_letter("a")]
#[case::plain("replicate")]
#[case::hyphenated("claude-code")]
#[case::digits_after_letter("gpt4-tracker")]
fn validate_accepts_kebab_case_ids(#[case] id: &str) {
    let m = PluginManifest::new(id, "Name", "1.0.0", PluginKind::Provider);
    assert!(m.validate().is_ok(), "expected '{id}' to be accepted");
}

#[rstest]
#[case::empty("", "empty")]
#[case::uppercase("Replicate", "lowercase letter")]
#[case::leading_digit("4chan", "lowercase letter")]
#[case::leading_hyphen("-replicate", "lowercase letter")]
#[case::underscore("repli_cate", "only lowercase letters")]
#[case::interior_uppercase("repliCate", "only lowercase letters")]
#[case::space("repli cate", "only lowercase letters")]
fn validate_rejects_invalid_ids(#[case] id: &str, #[case] rule_substring: &str) {
    let m = PluginManifest::new(id, "Name", "1.0.0", PluginKind::Provider);
    let err = m.validate().expect_err("should reject invalid id");
    assert!(matches!(err, PluginError::Validation { .. }));
    let message = err.to_string();
    assert!(
        message.contains("id") && message.contains(rule_substring),
        "expected id rule '{rule_substring}' in: {message}"
    );
}

#[test]
fn validate_rejects_blank_name() {
    let m = PluginManifest::new("replicate", "   ", "1.0.0", PluginKind::Provider);
    let err = m.validate().expect_err("should reject blank name");
    assert!(err.to_string().contains("name"), "got: {err}");
}

#[rstest]
#[case::plain("1.0.0")]
#[case::multi_digit("12.34.56")]
#[case::prerelease("1.0.0-beta.1")]
#[case::build_metadata("2.1.0+build5")]
#[case::lenient_suffix("1.0.0garbage")]
fn validate_accepts_semver_prefixed_versions(#[case] version: &str) {
    let m = PluginManifest::new("replicate", "Replicate", version, PluginKind::Provider);
    assert!(m.validate().is_ok(), "expected '{version}' to be accepted");
}

#[rstest]
#[case::empty("")]
#[case::two_groups("1.0")]
#[case::leading_v("v1.0.0")]
#[case::missing_patch("1.0.")]
#[case::word("latest")]
fn validate_rejects_malformed_versions(#[case] version: &str) {
    let m = PluginManifest::new("replicate", "Replicate", version, PluginKind::Provider);
    let err = m.validate().expect_err("should reject malformed version");
    assert!(err.to_string().contains("version"), "got: {err}");
}

// ---------------------------------------------------------------------------
// Serde round-trip
// ---------------------------------------------------------------------------

#[test]
fn manifest_serde_round_trip() {
    let m = make_manifest().with_meta(PluginMeta::new().with_license("MIT"));
    let json = serde_json::to_string(&m).expect("serialise");
    let back: PluginManifest = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back, m);
}

#[test]
fn manifest_deserialise_defaults_contract_version_to_zero() {
    let json = r#"{
        "id": "replicate",
        "name": "Replicate",
        "version": "1.0.0",
        "kind": "provider"
    }"#;
    let m: PluginManifest = serde_json::from_str(json).expect("deserialise");
    assert_eq!(m.contract_version(), 0);
    assert!(m.permissions().network().is_none());
}
