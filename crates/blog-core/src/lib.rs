//! # Blog Core
//!
//! The domain layer of Inkpad.
//! This crate owns the post collection and its write-through contract with a
//! persistent key-value slot. Storage, time and id generation are reached only
//! through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod store;

pub use error::DomainError;
pub use store::{CorruptDataPolicy, LoadWarning, PostStore, StoreOptions};
