use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::team::Team;

/// Repository trait for Team aggregate
///
/// Defines the contract for persisting and retrieving teams.
/// Implementations should handle database-specific details.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save a team (insert or update)
    async fn save(&self, team: &Team) -> RepositoryResult<()>;

    /// Delete a team by ID
    async fn delete(&self, id: Uuid) -> RepositoryResult<()>;

    /// Load every stored team, oldest registration first
    async fn load_all(&self) -> RepositoryResult<Vec<Team>>;
}
