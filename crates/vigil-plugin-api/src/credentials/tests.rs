//! Unit tests for credential bundles and discovery results.

use rstest::rstest;
use serde_json::json;

use super::*;

// ---------------------------------------------------------------------------
// Credentials constructors
// ---------------------------------------------------------------------------

#[test]
fn api_key_defaults_to_env_source() {
    let credentials = Credentials::api_key("sk-1");
    assert_eq!(credentials.api_key_value(), Some("sk-1"));
    assert!(credentials.oauth_value().is_none());
    assert_eq!(credentials.source(), CredentialSource::Env);
}

#[test]
fn api_key_from_overrides_source() {
    let credentials = Credentials::api_key_from("sk-1", CredentialSource::Config);
    assert_eq!(credentials.source(), CredentialSource::Config);
}

#[test]
fn oauth_defaults_to_external_source() {
    let credentials = Credentials::oauth(OAuthCredentials::new("tok"));
    assert!(credentials.api_key_value().is_none());
    assert_eq!(credentials.source(), CredentialSource::External);
}

#[test]
fn group_id_is_attachable() {
    let credentials = Credentials::api_key("sk-1").with_group_id("team-7");
    assert_eq!(credentials.group_id(), Some("team-7"));
}

// ---------------------------------------------------------------------------
// OAuth optional-field omission
// ---------------------------------------------------------------------------

#[test]
fn oauth_detail_contains_only_supplied_fields() {
    let oauth = OAuthCredentials::new("tok").with_refresh_token("r");
    let json = serde_json::to_value(&oauth).expect("serialise");
    let object = json.as_object().expect("object");
    assert_eq!(object.get("access_token"), Some(&json!("tok")));
    assert_eq!(object.get("refresh_token"), Some(&json!("r")));
    assert!(!object.contains_key("expires_at"));
    assert!(!object.contains_key("account_id"));
    assert!(!object.contains_key("managed_project_id"));
}

#[test]
fn oauth_builders_set_each_field() {
    let oauth = OAuthCredentials::new("tok")
        .with_expires_at(1_700_000_000_000)
        .with_account_id("acct")
        .with_managed_project_id("proj");
    assert_eq!(oauth.access_token(), "tok");
    assert_eq!(oauth.expires_at(), Some(1_700_000_000_000));
    assert_eq!(oauth.account_id(), Some("acct"));
    assert_eq!(oauth.managed_project_id(), Some("proj"));
    assert!(oauth.refresh_token().is_none());
}

#[test]
fn credentials_serde_round_trip() {
    let credentials =
        Credentials::oauth(OAuthCredentials::new("tok").with_refresh_token("r"))
            .with_group_id("team-7");
    let text = serde_json::to_string(&credentials).expect("serialise");
    let back: Credentials = serde_json::from_str(&text).expect("deserialise");
    assert_eq!(back, credentials);
}

// ---------------------------------------------------------------------------
// CredentialResult
// ---------------------------------------------------------------------------

#[test]
fn found_carries_credentials() {
    let result = CredentialResult::found(Credentials::api_key("sk-1"));
    assert!(result.is_found());
    assert!(result.credentials().is_some());
    assert!(result.reason().is_none());
    assert!(result.message().is_none());
}

#[rstest]
#[case::missing(CredentialResult::missing(), CredentialFailure::Missing)]
#[case::expired(CredentialResult::expired(), CredentialFailure::Expired)]
#[case::invalid(CredentialResult::invalid(), CredentialFailure::Invalid)]
fn failure_constructors_fix_the_reason(
    #[case] result: CredentialResult,
    #[case] expected: CredentialFailure,
) {
    assert!(!result.is_found());
    assert_eq!(result.reason(), Some(expected));
    assert!(result.message().is_none());
}

#[test]
fn error_requires_a_message() {
    let result = CredentialResult::error("store unreachable");
    assert_eq!(result.reason(), Some(CredentialFailure::Error));
    assert_eq!(result.message(), Some("store unreachable"));
}

#[test]
fn with_message_annotates_failures() {
    let result = CredentialResult::missing().with_message("no key");
    assert_eq!(result.reason(), Some(CredentialFailure::Missing));
    assert_eq!(result.message(), Some("no key"));
}

#[test]
fn with_message_leaves_found_untouched() {
    let result = CredentialResult::found(Credentials::api_key("sk-1")).with_message("noise");
    assert!(result.is_found());
    assert!(result.message().is_none());
}

#[test]
fn result_serializes_with_outcome_tag() {
    let found = CredentialResult::found(Credentials::api_key("sk-1"));
    let json = serde_json::to_value(&found).expect("serialise");
    assert_eq!(json.get("outcome"), Some(&json!("found")));

    let failed = CredentialResult::missing().with_message("no key");
    let json = serde_json::to_value(&failed).expect("serialise");
    assert_eq!(json.get("outcome"), Some(&json!("failed")));
    assert_eq!(json.get("reason"), Some(&json!("missing")));
    assert_eq!(json.get("message"), Some(&json!("no key")));
}

// ---------------------------------------------------------------------------
// Token expiry
// ---------------------------------------------------------------------------

const NOW: i64 = 1_700_000_000_000;

#[rstest]
#[case::zero_buffer(0)]
#[case::default_buffer(DEFAULT_EXPIRY_BUFFER_MS)]
#[case::huge_buffer(i64::MAX)]
fn no_expiry_never_expires(#[case] buffer_ms: i64) {
    assert!(!expired_relative_to(None, buffer_ms, NOW));
}

#[rstest]
#[case::just_past(NOW - 1, 0, true)]
#[case::exactly_now(NOW, 0, true)]
#[case::just_ahead(NOW + 1, 0, false)]
#[case::inside_buffer(NOW + 240_000, DEFAULT_EXPIRY_BUFFER_MS, true)]
#[case::outside_buffer(NOW + 360_000, DEFAULT_EXPIRY_BUFFER_MS, false)]
fn expiry_respects_the_buffer(
    #[case] expires_at: i64,
    #[case] buffer_ms: i64,
    #[case] expected: bool,
) {
    assert_eq!(expired_relative_to(Some(expires_at), buffer_ms, NOW), expected);
}

#[test]
fn public_wrappers_agree_on_distant_instants() {
    // Far enough from the wall clock that the wrappers cannot race it.
    assert!(is_token_expired(Some(0)));
    assert!(!is_token_expired(Some(i64::MAX)));
    assert!(!is_token_expired(None));
    assert!(is_token_expired_with_buffer(Some(0), 0));
    assert!(!is_token_expired_with_buffer(Some(i64::MAX), 0));
}
