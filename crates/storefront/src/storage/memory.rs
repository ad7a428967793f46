//! In-process storage backends.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::KeyValueStore;

/// Storage held in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Storage with no backing context.
///
/// Reads always miss and writes are dropped, so everything built on it
/// behaves as if freshly started.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedStorage;

impl KeyValueStore for DetachedStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get("k").is_none());

        storage.set("k", "v1");
        storage.set("k", "v2");
        assert_eq!(storage.get("k").as_deref(), Some("v2"));

        storage.remove("k");
        assert!(storage.get("k").is_none());
    }

    #[test]
    fn test_detached_storage_ignores_writes() {
        let storage = DetachedStorage;
        storage.set("k", "v");
        assert!(storage.get("k").is_none());
        storage.remove("k");
    }
}
