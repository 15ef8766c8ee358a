//! Unit tests for usage value types.

use std::collections::BTreeMap;

use serde_json::json;

use super::*;

#[test]
fn token_total_sums_reported_counts() {
    let tokens = TokenUsage::new(100, 40);
    assert_eq!(tokens.total(), 140);
    let with_cache = tokens.with_cache_read(10).with_cache_write(5);
    assert_eq!(with_cache.total(), 155);
}

#[test]
fn token_total_saturates_instead_of_overflowing() {
    let tokens = TokenUsage::new(u64::MAX, 1);
    assert_eq!(tokens.total(), u64::MAX);
}

#[test]
fn empty_snapshot_reports_nothing() {
    let snapshot = ProviderUsageData::new(1_700_000_000_000);
    assert!(snapshot.limits().is_none());
    assert!(snapshot.tokens().is_none());
    assert!(snapshot.credits().is_none());
    assert!(snapshot.cost().is_none());
    assert!(snapshot.error().is_none());
    assert_eq!(snapshot.fetched_at(), 1_700_000_000_000);
}

#[test]
fn absent_blocks_are_omitted_from_serialization() {
    let snapshot = ProviderUsageData::new(1_700_000_000_000)
        .with_limits(UsageLimits::new().with_used(12.5).with_limit(100.0));
    let json = serde_json::to_value(&snapshot).expect("serialise");
    let object = json.as_object().expect("object");
    assert!(object.contains_key("limits"));
    assert!(object.contains_key("fetched_at"));
    assert!(!object.contains_key("tokens"));
    assert!(!object.contains_key("credits"));
    assert!(!object.contains_key("cost"));
    assert!(!object.contains_key("error"));
}

#[test]
fn snapshot_with_every_block_round_trips() {
    let snapshot = ProviderUsageData::new(1_700_000_000_000)
        .with_limits(
            UsageLimits::new()
                .with_used(12.5)
                .with_limit(100.0)
                .with_remaining(87.5)
                .with_resets_at(1_700_003_600_000),
        )
        .with_tokens(TokenUsage::new(120, 48).with_cache_read(10))
        .with_credits(CreditUsage::new().with_remaining(42.0))
        .with_cost(CostUsage::new(1.23, "USD"))
        .with_error("rate limited on the credits endpoint");
    let text = serde_json::to_string(&snapshot).expect("serialise");
    let back: ProviderUsageData = serde_json::from_str(&text).expect("deserialise");
    assert_eq!(back, snapshot);
}

#[test]
fn session_record_builders_attach_optionals() {
    let mut metadata = BTreeMap::new();
    metadata.insert("branch".to_owned(), json!("main"));
    let record = SessionUsageData::new(
        "sess-1",
        "anthropic",
        "claude-sonnet",
        TokenUsage::new(1_000, 250),
        1_700_000_000_000,
    )
    .with_cost(0.04)
    .with_metadata(metadata);

    assert_eq!(record.session_id(), "sess-1");
    assert_eq!(record.provider_id(), "anthropic");
    assert_eq!(record.model_id(), "claude-sonnet");
    assert_eq!(record.tokens().total(), 1_250);
    assert_eq!(record.cost(), Some(0.04));
    assert!(record.metadata().is_some_and(|m| m.contains_key("branch")));
}

#[test]
fn session_record_serde_round_trip() {
    let record = SessionUsageData::new(
        "sess-1",
        "openai",
        "gpt-4o",
        TokenUsage::new(10, 5),
        1_700_000_000_000,
    );
    let text = serde_json::to_string(&record).expect("serialise");
    let back: SessionUsageData = serde_json::from_str(&text).expect("deserialise");
    assert_eq!(back, record);
    let json: serde_json::Value = serde_json::from_str(&text).expect("parse");
    assert!(json.get("cost").is_none());
    assert!(json.get("metadata").is_none());
}
