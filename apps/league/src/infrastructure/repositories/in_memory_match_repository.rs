use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::matches::Match;
use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::repositories::{MatchRepository, RepositoryError};

/// In-memory implementation of MatchRepository
#[derive(Debug, Default)]
pub struct InMemoryMatchRepository {
    matches: RwLock<Vec<Match>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn save(&self, game: &Match) -> RepositoryResult<()> {
        let mut matches = self.matches.write().await;
        match matches.iter_mut().find(|m| m.id() == game.id()) {
            Some(existing) => *existing = game.clone(),
            None => matches.push(game.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let mut matches = self.matches.write().await;
        let index = matches
            .iter()
            .position(|m| m.id() == id)
            .ok_or(RepositoryError::NotFound(id))?;
        matches.remove(index);
        Ok(())
    }

    async fn load_all(&self) -> RepositoryResult<Vec<Match>> {
        Ok(self.matches.read().await.clone())
    }
}
