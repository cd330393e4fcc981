use thiserror::Error;
use uuid::Uuid;

use crate::domain::repositories::RepositoryError;

/// Errors returned by ledger operations
///
/// Every variant is recoverable: the ledger is left exactly as it was
/// before the failed call.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid team name: {0}")]
    InvalidTeamName(String),

    #[error("A team named {0:?} already exists")]
    DuplicateTeam(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Team {0} cannot play against itself")]
    SameTeam(Uuid),

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("Match not found: {0}")]
    MatchNotFound(Uuid),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] RepositoryError),

    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
