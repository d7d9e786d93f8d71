//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostId;
use crate::ports::StorageError;

/// Domain errors - failures of a single store operation.
///
/// None of these leave the store unusable; the in-memory collection stays
/// authoritative for the rest of the session.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: PostId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StorageError),

    #[error("Stored posts could not be decoded: {0}")]
    Deserialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, DomainError::Persistence(_))
    }
}
