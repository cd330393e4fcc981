use thiserror::Error;
use uuid::Uuid;

/// Errors reported by storage adapters
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("Stored record is invalid: {0}")]
    InvalidRecord(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
