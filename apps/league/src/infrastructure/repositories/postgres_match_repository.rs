use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::matches::{Match, Score};
use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::repositories::{MatchRepository, RepositoryError};

/// PostgreSQL implementation of MatchRepository
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    /// Creates a new PostgresMatchRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MatchRow {
    id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    home_score: i32,
    away_score: i32,
    played_at: DateTime<Utc>,
}

impl TryFrom<MatchRow> for Match {
    type Error = RepositoryError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let invalid = |e: String| RepositoryError::InvalidRecord(format!("match {}: {}", row.id, e));
        let home_score = Score::new(i64::from(row.home_score)).map_err(invalid)?;
        let away_score = Score::new(i64::from(row.away_score)).map_err(invalid)?;

        Ok(Match::from_persistence(
            row.id,
            row.home_team_id,
            row.away_team_id,
            home_score,
            away_score,
            row.played_at,
        ))
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    async fn save(&self, game: &Match) -> RepositoryResult<()> {
        // Score::MAX keeps both values inside i32
        let home_score = i32::try_from(game.home_score().value())
            .map_err(|e| RepositoryError::InvalidRecord(e.to_string()))?;
        let away_score = i32::try_from(game.away_score().value())
            .map_err(|e| RepositoryError::InvalidRecord(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO matches (
                id, home_team_id, away_team_id, home_score, away_score, played_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(game.id())
        .bind(game.home_team_id())
        .bind(game.away_team_id())
        .bind(home_score)
        .bind(away_score)
        .bind(game.played_at())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Backend(format!("Failed to save match: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Backend(format!("Failed to delete match: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }

    async fn load_all(&self) -> RepositoryResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT id, home_team_id, away_team_id, home_score, away_score, played_at
            FROM matches
            ORDER BY played_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Backend(format!("Failed to load matches: {}", e)))?;

        rows.into_iter().map(Match::try_from).collect()
    }
}
