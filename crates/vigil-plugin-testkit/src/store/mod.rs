//! In-memory key-value store for plugin unit tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use vigil_plugin_api::context::KeyValueStore;

/// A [`KeyValueStore`] backed by a plain in-memory map.
///
/// Semantics are fully synchronous; the asynchronous signatures exist only
/// so plugin code written against the host's real (asynchronous) storage
/// runs unmodified against the mock.
///
/// # Example
///
/// ```
/// use vigil_plugin_api::context::KeyValueStore;
/// use vigil_plugin_testkit::MockStore;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = MockStore::new();
/// store.set("cursor", "42").await;
/// assert_eq!(store.get("cursor").await.as_deref(), Some("42"));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MockStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with the given entries.
    #[must_use]
    pub fn seeded(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Returns a snapshot of the current contents.
    #[must_use]
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl KeyValueStore for MockStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    async fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    async fn delete(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    async fn has(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}
