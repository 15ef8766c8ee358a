//! Usage snapshot and session record value types.
//!
//! Provider plugins return a [`ProviderUsageData`] snapshot per fetch;
//! agent plugins return a flat ordered sequence of [`SessionUsageData`]
//! records parsed out of local session logs. Every nested block on the
//! provider snapshot is optional: absence means "not reported by this
//! provider", not zero. Aggregation is the host's job.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token counts for one request, session, or billing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    input: u64,
    output: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cache_read: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cache_write: Option<u64>,
}

impl TokenUsage {
    /// Creates a count with input and output tokens only.
    #[must_use]
    pub const fn new(input: u64, output: u64) -> Self {
        Self {
            input,
            output,
            cache_read: None,
            cache_write: None,
        }
    }

    /// Records cache-read tokens.
    #[must_use]
    pub const fn with_cache_read(mut self, cache_read: u64) -> Self {
        self.cache_read = Some(cache_read);
        self
    }

    /// Records cache-write tokens.
    #[must_use]
    pub const fn with_cache_write(mut self, cache_write: u64) -> Self {
        self.cache_write = Some(cache_write);
        self
    }

    /// Returns the input token count.
    #[must_use]
    pub const fn input(&self) -> u64 {
        self.input
    }

    /// Returns the output token count.
    #[must_use]
    pub const fn output(&self) -> u64 {
        self.output
    }

    /// Returns the cache-read token count, if reported.
    #[must_use]
    pub const fn cache_read(&self) -> Option<u64> {
        self.cache_read
    }

    /// Returns the cache-write token count, if reported.
    #[must_use]
    pub const fn cache_write(&self) -> Option<u64> {
        self.cache_write
    }

    /// Returns the sum of every reported count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        let mut total = self.input.saturating_add(self.output);
        if let Some(cache_read) = self.cache_read {
            total = total.saturating_add(cache_read);
        }
        if let Some(cache_write) = self.cache_write {
            total = total.saturating_add(cache_write);
        }
        total
    }
}

/// Rate or quota limits reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageLimits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    used: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remaining: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resets_at: Option<i64>,
}

impl UsageLimits {
    /// Creates an empty block; populate with the `with_*` builders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records how much of the quota is consumed.
    #[must_use]
    pub const fn with_used(mut self, used: f64) -> Self {
        self.used = Some(used);
        self
    }

    /// Records the total quota.
    #[must_use]
    pub const fn with_limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Records the remaining quota.
    #[must_use]
    pub const fn with_remaining(mut self, remaining: f64) -> Self {
        self.remaining = Some(remaining);
        self
    }

    /// Records when the quota window resets, in epoch milliseconds.
    #[must_use]
    pub const fn with_resets_at(mut self, resets_at: i64) -> Self {
        self.resets_at = Some(resets_at);
        self
    }

    /// Returns the consumed amount, if reported.
    #[must_use]
    pub const fn used(&self) -> Option<f64> {
        self.used
    }

    /// Returns the total quota, if reported.
    #[must_use]
    pub const fn limit(&self) -> Option<f64> {
        self.limit
    }

    /// Returns the remaining quota, if reported.
    #[must_use]
    pub const fn remaining(&self) -> Option<f64> {
        self.remaining
    }

    /// Returns the window reset instant, if reported.
    #[must_use]
    pub const fn resets_at(&self) -> Option<i64> {
        self.resets_at
    }
}

/// Prepaid credit balances reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    used: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remaining: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    granted: Option<f64>,
}

impl CreditUsage {
    /// Creates an empty block; populate with the `with_*` builders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records credits consumed.
    #[must_use]
    pub const fn with_used(mut self, used: f64) -> Self {
        self.used = Some(used);
        self
    }

    /// Records credits remaining.
    #[must_use]
    pub const fn with_remaining(mut self, remaining: f64) -> Self {
        self.remaining = Some(remaining);
        self
    }

    /// Records credits granted in total.
    #[must_use]
    pub const fn with_granted(mut self, granted: f64) -> Self {
        self.granted = Some(granted);
        self
    }

    /// Returns credits consumed, if reported.
    #[must_use]
    pub const fn used(&self) -> Option<f64> {
        self.used
    }

    /// Returns credits remaining, if reported.
    #[must_use]
    pub const fn remaining(&self) -> Option<f64> {
        self.remaining
    }

    /// Returns credits granted, if reported.
    #[must_use]
    pub const fn granted(&self) -> Option<f64> {
        self.granted
    }
}

/// Monetary cost reported by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostUsage {
    amount: f64,
    currency: String,
}

impl CostUsage {
    /// Creates a cost in the given ISO 4217 currency.
    #[must_use]
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the currency code.
    #[must_use]
    pub const fn currency(&self) -> &str {
        self.currency.as_str()
    }
}

/// A snapshot of provider-reported usage.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::usage::{ProviderUsageData, TokenUsage};
///
/// let snapshot = ProviderUsageData::new(1_700_000_000_000)
///     .with_tokens(TokenUsage::new(120, 48));
/// assert!(snapshot.limits().is_none());
/// assert_eq!(snapshot.tokens().map(|t| t.total()), Some(168));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderUsageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limits: Option<UsageLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tokens: Option<TokenUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credits: Option<CreditUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost: Option<CostUsage>,
    fetched_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ProviderUsageData {
    /// Creates an empty snapshot taken at `fetched_at` (epoch ms).
    #[must_use]
    pub const fn new(fetched_at: i64) -> Self {
        Self {
            limits: None,
            tokens: None,
            credits: None,
            cost: None,
            fetched_at,
            error: None,
        }
    }

    /// Attaches a limits block.
    #[must_use]
    pub const fn with_limits(mut self, limits: UsageLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Attaches a token block.
    #[must_use]
    pub const fn with_tokens(mut self, tokens: TokenUsage) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Attaches a credits block.
    #[must_use]
    pub const fn with_credits(mut self, credits: CreditUsage) -> Self {
        self.credits = Some(credits);
        self
    }

    /// Attaches a cost block.
    #[must_use]
    pub fn with_cost(mut self, cost: CostUsage) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Records a partial-failure note the dashboard should surface.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Returns the limits block, if reported.
    #[must_use]
    pub const fn limits(&self) -> Option<&UsageLimits> {
        self.limits.as_ref()
    }

    /// Returns the token block, if reported.
    #[must_use]
    pub const fn tokens(&self) -> Option<&TokenUsage> {
        self.tokens.as_ref()
    }

    /// Returns the credits block, if reported.
    #[must_use]
    pub const fn credits(&self) -> Option<&CreditUsage> {
        self.credits.as_ref()
    }

    /// Returns the cost block, if reported.
    #[must_use]
    pub const fn cost(&self) -> Option<&CostUsage> {
        self.cost.as_ref()
    }

    /// Returns when the snapshot was taken, in epoch milliseconds.
    #[must_use]
    pub const fn fetched_at(&self) -> i64 {
        self.fetched_at
    }

    /// Returns the partial-failure note, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// One parsed usage record from an agent's local session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUsageData {
    session_id: String,
    provider_id: String,
    model_id: String,
    tokens: TokenUsage,
    timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<BTreeMap<String, Value>>,
}

impl SessionUsageData {
    /// Creates a record for one session entry.
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        provider_id: impl Into<String>,
        model_id: impl Into<String>,
        tokens: TokenUsage,
        timestamp: i64,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            provider_id: provider_id.into(),
            model_id: model_id.into(),
            tokens,
            timestamp,
            cost: None,
            metadata: None,
        }
    }

    /// Attaches a computed cost for the entry.
    #[must_use]
    pub const fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Attaches free-form metadata preserved for the dashboard.
    #[must_use]
    pub fn with_metadata(mut self, metadata: BTreeMap<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn session_id(&self) -> &str {
        self.session_id.as_str()
    }

    /// Returns the provider the session talked to.
    #[must_use]
    pub const fn provider_id(&self) -> &str {
        self.provider_id.as_str()
    }

    /// Returns the model the session used.
    #[must_use]
    pub const fn model_id(&self) -> &str {
        self.model_id.as_str()
    }

    /// Returns the token counts.
    #[must_use]
    pub const fn tokens(&self) -> &TokenUsage {
        &self.tokens
    }

    /// Returns the entry timestamp, in epoch milliseconds.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the computed cost, if recorded.
    #[must_use]
    pub const fn cost(&self) -> Option<f64> {
        self.cost
    }

    /// Returns the preserved metadata, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&BTreeMap<String, Value>> {
        self.metadata.as_ref()
    }
}

#[cfg(test)]
mod tests;
