use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use business::domain::cart::guest_store::{KeyValueStore, StoreError};

/// Process-local store. Contents are lost on restart.
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
    quota_bytes: usize,
}

impl InMemoryStore {
    pub fn new(quota_bytes: usize) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            quota_bytes,
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.len() > self.quota_bytes {
            return Err(StoreError::QuotaExceeded);
        }
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_overwrite_value_for_same_key() {
        let store = InMemoryStore::new(64);

        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn should_keep_previous_value_when_quota_exceeded() {
        let store = InMemoryStore::new(3);
        store.set("k", "abc").await.unwrap();

        let result = store.set("k", "abcd").await;

        assert!(matches!(result.unwrap_err(), StoreError::QuotaExceeded));
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("abc"));
    }
}
