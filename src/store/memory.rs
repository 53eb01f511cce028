//! In-process key-value store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{RescisaoError, RescisaoResult};

use super::KeyValueStore;

/// A key-value store held in memory.
///
/// Clones share the same underlying map.
///
/// # Example
///
/// ```
/// use rescisao_client::store::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// let handle = store.clone();
/// store.set("k", "v".to_string()).unwrap();
/// assert_eq!(handle.get("k").unwrap().as_deref(), Some("v"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    fn lock(&self) -> RescisaoResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| RescisaoError::Store {
            message: "memory store lock poisoned".to_string(),
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> RescisaoResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> RescisaoResult<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> RescisaoResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
