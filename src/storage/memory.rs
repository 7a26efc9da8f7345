//! In-process key-value store.

use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::Result;

/// Key-value store kept in memory; used by tests and by embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored entries.
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Build a store pre-populated with entries.
    ///
    /// Inputs:
    /// - `entries`: `(key, value)` pairs; later pairs overwrite earlier ones.
    ///
    /// Output:
    /// - Store containing those entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Current value for `key`, read synchronously.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Copy of every stored entry.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| "memory store mutex poisoned")?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| "memory store mutex poisoned")?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    /// What: Values written through the trait are visible to reads and snapshots.
    ///
    /// - Input: Pre-populated store, one overwrite, one new key
    /// - Output: `get` returns the latest values; absent keys read as `None`
    async fn memory_store_get_set() {
        let store = MemoryStore::with_entries([("darkMode", "false")]);
        assert_eq!(
            store.get("darkMode").await.expect("get"),
            Some("false".to_string())
        );
        store.set("darkMode", "true").await.expect("set");
        store.set("language", "tl").await.expect("set");
        assert_eq!(store.value("darkMode").as_deref(), Some("true"));
        assert_eq!(store.get("missing").await.expect("get"), None);
        assert_eq!(store.snapshot().len(), 2);
    }
}
