//! In-memory storage - process-local, optionally bounded like browser storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{Storage, StorageError};

/// In-memory storage using a simple HashMap with async RwLock.
///
/// With a quota set, writes that would push the total size of keys and
/// values past the limit fail with [`StorageError::QuotaExceeded`] and leave
/// the previous value in place.
/// Note: Data is lost on process restart.
pub struct InMemoryStorage {
    store: RwLock<HashMap<String, String>>,
    quota_bytes: RwLock<Option<usize>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            quota_bytes: RwLock::new(None),
        }
    }

    /// Storage that rejects writes beyond `quota_bytes` in total.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            quota_bytes: RwLock::new(Some(quota_bytes)),
        }
    }

    /// Change or lift the quota. Existing data is kept even if it is over.
    pub async fn set_quota(&self, quota_bytes: Option<usize>) {
        *self.quota_bytes.write().await = quota_bytes;
    }

    /// Bytes currently used by keys and values.
    pub async fn used_bytes(&self) -> usize {
        let store = self.store.read().await;
        store.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let quota = *self.quota_bytes.read().await;
        let mut store = self.store.write().await;

        if let Some(limit) = quota {
            let used: usize = store.iter().map(|(k, v)| k.len() + v.len()).sum();
            let replaced = store.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let requested = used - replaced + key.len() + value.len();
            if requested > limit {
                tracing::warn!(key = %key, requested, limit, "Storage quota exceeded");
                return Err(StorageError::QuotaExceeded { requested, limit });
            }
        }

        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }
}
