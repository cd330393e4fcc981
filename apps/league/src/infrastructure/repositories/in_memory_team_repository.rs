use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::repositories::{RepositoryError, TeamRepository};
use crate::domain::team::Team;

/// In-memory implementation of TeamRepository
///
/// Keeps teams in registration order. Used by tests and by the server when
/// no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<Vec<Team>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn save(&self, team: &Team) -> RepositoryResult<()> {
        let mut teams = self.teams.write().await;
        match teams.iter_mut().find(|t| t.id() == team.id()) {
            Some(existing) => *existing = team.clone(),
            None => teams.push(team.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut teams = self.teams.write().await;
        let index = teams
            .iter()
            .position(|t| t.id() == id)
            .ok_or(RepositoryError::NotFound(id))?;
        teams.remove(index);
        Ok(())
    }

    async fn load_all(&self) -> RepositoryResult<Vec<Team>> {
        Ok(self.teams.read().await.clone())
    }
}
