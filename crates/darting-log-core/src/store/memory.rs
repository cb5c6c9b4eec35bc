//! In-process store for tests and throwaway sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{KeyValueStore, StoreError, StoreResult};

/// Map-backed [`KeyValueStore`]. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, Value>>> {
        self.values
            .lock()
            .map_err(|e| StoreError::Backend(format!("Lock poisoned: {}", e)))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("drugs").unwrap().is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemoryStore::new();
        store.set("drugs", &json!([1])).unwrap();
        store.set("drugs", &json!([1, 2])).unwrap();
        assert_eq!(store.get("drugs").unwrap(), Some(json!([1, 2])));
    }
}
