//! Storage implementations - in-memory, file and Redis slots.

mod file;
mod memory;

#[cfg(feature = "redis")]
mod redis;

use std::sync::Arc;

use blog_core::ports::{Storage, StorageError};

pub use file::{FileStorage, FileStorageConfig};
pub use memory::InMemoryStorage;

#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisStorage};

/// Which storage backend to open, as chosen by configuration.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    Memory,
    File(FileStorageConfig),
    #[cfg(feature = "redis")]
    Redis(RedisConfig),
}

impl StorageBackend {
    /// Load the backend choice from environment variables.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the backend using `lookup` for variable access.
    ///
    /// `BLOG_STORAGE` selects `file` (default), `memory` or `redis`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StorageError> {
        let kind = lookup("BLOG_STORAGE").unwrap_or_else(|| "file".to_string());

        match kind.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File(FileStorageConfig::from_lookup(&lookup))),
            #[cfg(feature = "redis")]
            "redis" => Ok(Self::Redis(RedisConfig::from_lookup(&lookup))),
            other => Err(StorageError::Operation(format!(
                "unsupported storage backend '{other}'"
            ))),
        }
    }

    /// Open the configured backend.
    pub async fn open(&self) -> Result<Arc<dyn Storage>, StorageError> {
        match self {
            Self::Memory => {
                tracing::warn!("Using in-memory storage - posts are lost when the process exits");
                Ok(Arc::new(InMemoryStorage::new()))
            }
            Self::File(config) => Ok(Arc::new(FileStorage::open(config.clone()).await?)),
            #[cfg(feature = "redis")]
            Self::Redis(config) => match RedisStorage::new(config.clone()).await {
                Ok(storage) => Ok(Arc::new(storage)),
                Err(e) if config.fallback_to_memory => {
                    tracing::error!(
                        error = %e,
                        "Redis unavailable, falling back to in-memory storage"
                    );
                    Ok(Arc::new(InMemoryStorage::new()))
                }
                Err(e) => Err(e),
            },
        }
    }
}
