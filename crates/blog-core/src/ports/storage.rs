use async_trait::async_trait;

/// Storage trait - a persistent key-value slot holding whole serialized blobs.
///
/// Writes replace the value for a key in one step; there are no partial writes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the blob stored under `key`, `None` if the key was never set.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("I/O failed: {0}")]
    Io(String),

    #[error("Quota exceeded: {requested} bytes requested, limit is {limit} bytes")]
    QuotaExceeded { requested: usize, limit: usize },

    #[error("Operation failed: {0}")]
    Operation(String),
}
