use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::matches::Match;

/// Repository trait for Match records
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Save a match (insert or update)
    async fn save(&self, game: &Match) -> RepositoryResult<()>;

    /// Delete a match by ID
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Load every stored match
    async fn load_all(&self) -> RepositoryResult<Vec<Match>>;
}
