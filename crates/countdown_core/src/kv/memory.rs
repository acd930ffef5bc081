//! Process-local key-value store.

use super::{KeyValueStore, KvError, KvResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory backend; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.lock().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> KvResult<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| KvError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::kv::KeyValueStore;

    #[test]
    fn set_replaces_previous_value() {
        let store = MemoryKeyValueStore::new();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryKeyValueStore::new();
        assert!(store.get("absent").unwrap().is_none());
        assert!(store.is_empty());
    }
}
