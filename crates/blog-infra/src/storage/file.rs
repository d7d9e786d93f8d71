//! File-backed storage - one file per key under a data directory.
//!
//! Writes go to a temp file next to the target and are renamed into place,
//! so a reader never sees a half-written blob.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use blog_core::ports::{Storage, StorageError};

/// File storage configuration.
#[derive(Debug, Clone)]
pub struct FileStorageConfig {
    /// Directory holding one `<key>.json` file per key.
    pub dir: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".blog-data"),
        }
    }
}

impl FileStorageConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            dir: lookup("BLOG_DATA_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| FileStorageConfig::default().dir),
        }
    }
}

/// Storage that keeps each key in its own file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open the storage directory, creating it if needed.
    pub async fn open(config: FileStorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.dir)
            .await
            .map_err(|e| io_error("create data dir", &config.dir, e))?;

        tracing::debug!(dir = %config.dir.display(), "File storage ready");

        Ok(Self { dir: config.dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::Operation("storage key must not be empty".to_string()));
        }
        Ok(self.dir.join(format!("{}.json", encode_key(key))))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value)
            .await
            .map_err(|e| io_error("write temp", &temp_path, e))?;

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(io_error("rename", &path, e));
        }

        tracing::trace!(key = %key, bytes = value.len(), "Blob written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", &path, e)),
        }
    }
}

/// Percent-encode everything outside `[A-Za-z0-9_-]` so any key maps to one
/// safe, distinct file name.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}

fn io_error(action: &str, path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io(format!("{action} {}: {err}", path.display()))
}
