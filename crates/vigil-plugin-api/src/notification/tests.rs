//! Unit tests for notification event types.

use rstest::rstest;

use super::*;

#[rstest]
#[case::threshold(NotificationKind::ThresholdReached, "threshold_reached")]
#[case::quota(NotificationKind::QuotaExhausted, "quota_exhausted")]
#[case::credential(NotificationKind::CredentialExpiring, "credential_expiring")]
#[case::fetch(NotificationKind::FetchFailed, "fetch_failed")]
#[case::state(NotificationKind::PluginStateChanged, "plugin_state_changed")]
fn kind_serializes_snake_case(#[case] kind: NotificationKind, #[case] expected: &str) {
    assert_eq!(kind.to_string(), expected);
    let json = serde_json::to_string(&kind).expect("serialise");
    assert_eq!(json, format!("\"{expected}\""));
}

#[test]
fn severities_order_by_urgency() {
    assert!(NotificationSeverity::Info < NotificationSeverity::Warning);
    assert!(NotificationSeverity::Warning < NotificationSeverity::Critical);
}

#[test]
fn event_accessors_return_constructed_values() {
    let event = NotificationEvent::new(
        NotificationKind::FetchFailed,
        NotificationSeverity::Warning,
        "Fetch failed",
        "Replicate returned HTTP 503 twice in a row.",
        1_700_000_000_000,
    );
    assert_eq!(event.kind(), NotificationKind::FetchFailed);
    assert_eq!(event.severity(), NotificationSeverity::Warning);
    assert_eq!(event.title(), "Fetch failed");
    assert!(event.message().contains("503"));
    assert_eq!(event.timestamp(), 1_700_000_000_000);
}

#[test]
fn event_serde_round_trip() {
    let event = NotificationEvent::new(
        NotificationKind::ThresholdReached,
        NotificationSeverity::Info,
        "80% of quota used",
        "The Anthropic monthly quota is 80% consumed.",
        1_700_000_000_000,
    );
    let text = serde_json::to_string(&event).expect("serialise");
    let back: NotificationEvent = serde_json::from_str(&text).expect("deserialise");
    assert_eq!(back, event);
}
