//! # Blog Infrastructure
//!
//! Concrete implementations of the [`Storage`](blog_core::ports::Storage) port.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All backends enabled
//! - `minimal` - In-memory and file storage only
//! - `redis` - Redis-backed storage

pub mod storage;

pub use storage::{FileStorage, FileStorageConfig, InMemoryStorage, StorageBackend};

#[cfg(feature = "redis")]
pub use storage::{RedisConfig, RedisStorage};
