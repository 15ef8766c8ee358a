//! In-memory test harness for Vigil plugins.
//!
//! Plugins written against `vigil-plugin-api` depend on capabilities the
//! host injects at runtime: a logger, an HTTP client, a key-value store,
//! and credential discovery sources. This crate provides in-memory
//! implementations of all of them plus factories that assemble complete
//! contexts, so plugin behaviour can be unit-tested without a running
//! host, network access, or a filesystem.
//!
//! The mocks are deliberately observable: the logger captures every line,
//! the HTTP client records every call, and the store exposes snapshots of
//! its contents.
//!
//! ```
//! use serde_json::json;
//! use vigil_plugin_testkit::{MockResponse, TestContextOptions, create_test_context};
//!
//! let harness = create_test_context(
//!     TestContextOptions::new()
//!         .with_env_var("EXAMPLE_API_KEY", "sk-test")
//!         .with_route("https://api.example.com/usage", MockResponse::ok(json!({"used": 1}))),
//! )
//! .unwrap();
//! assert!(harness.context().auth().env().var("EXAMPLE_API_KEY").is_some());
//! ```

pub mod context;
pub mod http;
pub mod logger;
pub mod store;

pub use context::{
    MapEnv, MapFiles, NullOpencodeStore, TestContext, TestContextOptions,
    create_test_agent_fetch_context, create_test_context, create_test_provider_fetch_context,
};
pub use http::{DEFAULT_UNMATCHED_STATUS, MockHttpClient, MockResponse, RecordedCall};
pub use logger::{LogEntry, MockLogger};
pub use store::MockStore;
