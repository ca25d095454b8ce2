//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business rule failures raised by handlers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Access denied: {0}")]
    Forbidden(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
