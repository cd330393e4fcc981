use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::column::{to_column, to_counter};
use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::repositories::{RepositoryError, TeamRepository};
use crate::domain::scoring::Aggregate;
use crate::domain::team::{Team, TeamName};

/// PostgreSQL implementation of TeamRepository
///
/// Provides persistence for Team aggregates using runtime-checked SQLx
/// queries against PostgreSQL.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    played: i32,
    wins: i32,
    draws: i32,
    losses: i32,
    goal_difference: i64,
    points: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
    type Error = RepositoryError;

    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        let name = TeamName::new(row.name)
            .map_err(|e| RepositoryError::InvalidRecord(format!("team {}: {}", row.id, e)))?;

        let aggregate = Aggregate {
            played: to_counter("played", row.played)?,
            wins: to_counter("wins", row.wins)?,
            draws: to_counter("draws", row.draws)?,
            losses: to_counter("losses", row.losses)?,
            goal_difference: row.goal_difference,
            points: to_counter("points", row.points)?,
        };

        Ok(Team::from_persistence(row.id, name, aggregate, row.created_at))
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save(&self, team: &Team) -> RepositoryResult<()> {
        let stats = team.aggregate();

        sqlx::query(
            r#"
            INSERT INTO teams (
                id, name, name_key, played, wins, draws, losses,
                goal_difference, points, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                played = EXCLUDED.played,
                wins = EXCLUDED.wins,
                draws = EXCLUDED.draws,
                losses = EXCLUDED.losses,
                goal_difference = EXCLUDED.goal_difference,
                points = EXCLUDED.points
            "#,
        )
        .bind(team.id())
        .bind(team.name().as_str())
        .bind(team.name().key())
        .bind(to_column("played", stats.played)?)
        .bind(to_column("wins", stats.wins)?)
        .bind(to_column("draws", stats.draws)?)
        .bind(to_column("losses", stats.losses)?)
        .bind(stats.goal_difference)
        .bind(to_column("points", stats.points)?)
        .bind(team.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Backend(format!("Failed to save team: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Backend(format!("Failed to delete team: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }

    async fn load_all(&self) -> RepositoryResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT
                id, name, played, wins, draws, losses,
                goal_difference, points, created_at
            FROM teams
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Backend(format!("Failed to load teams: {}", e)))?;

        rows.into_iter().map(Team::try_from).collect()
    }
}
