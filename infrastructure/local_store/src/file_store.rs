use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use business::domain::cart::guest_store::{KeyValueStore, StoreError};

/// Stores each value in its own file, named after the percent-encoded key.
pub struct JsonFileStore {
    dir: PathBuf,
    quota_bytes: usize,
}

impl JsonFileStore {
    /// Opens the store, creating `dir` if needed.
    pub async fn open(dir: impl Into<PathBuf>, quota_bytes: usize) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| {
            tracing::error!("Cannot create store directory {}: {}", dir.display(), e);
            StoreError::Unavailable
        })?;
        Ok(Self { dir, quota_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        self.dir.join(format!("{}.json", encoded))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!("Cannot read key {}: {}", key, e);
                Err(StoreError::Unavailable)
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.len() > self.quota_bytes {
            return Err(StoreError::QuotaExceeded);
        }

        // Write aside and rename, so a reader never sees half a value.
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).await.map_err(|e| {
            tracing::error!("Cannot write key {}: {}", key, e);
            StoreError::Unavailable
        })?;
        fs::rename(&staging, &path).await.map_err(|e| {
            tracing::error!("Cannot commit key {}: {}", key, e);
            StoreError::Unavailable
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::error!("Cannot remove key {}: {}", key, e);
                Err(StoreError::Unavailable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_return_none_for_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path(), 1024).await.unwrap();

        assert_eq!(store.get("guest_cart:tab-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_persist_values_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path(), 1024).await.unwrap();
        store.set("guest_cart:tab-1", "[]").await.unwrap();

        let reopened = JsonFileStore::open(dir.path(), 1024).await.unwrap();

        assert_eq!(
            reopened.get("guest_cart:tab-1").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn should_keep_keys_inside_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path(), 1024).await.unwrap();

        store.set("guest_cart:../../etc/passwd", "x").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(store.path_for("../x").starts_with(dir.path()));
    }

    #[tokio::test]
    async fn should_refuse_values_over_quota() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path(), 4).await.unwrap();

        let result = store.set("k", "12345").await;

        assert!(matches!(result.unwrap_err(), StoreError::QuotaExceeded));
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn should_treat_removing_missing_key_as_success() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path(), 1024).await.unwrap();
        store.set("k", "v").await.unwrap();

        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
