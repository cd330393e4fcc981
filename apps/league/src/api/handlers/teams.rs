use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::team::Team;
use crate::ledger::Ledger;

/// Request body for registering a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

/// Team as returned by the API
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            name: team.name().to_string(),
            played: team.played(),
            wins: team.wins(),
            draws: team.draws(),
            losses: team.losses(),
            goal_difference: team.goal_difference(),
            points: team.points(),
        }
    }
}

/// Register a new team
///
/// POST /api/teams
pub async fn create_team(
    State(ledger): State<Arc<Ledger>>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let id = ledger.register_team(&req.name).await?;
    let team = ledger
        .team(id)
        .await
        .ok_or_else(|| ApiError::not_found("team_not_found", format!("Team not found: {}", id)))?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// Get a team by ID
///
/// GET /api/teams/:id
pub async fn get_team(
    State(ledger): State<Arc<Ledger>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = ledger
        .team(id)
        .await
        .ok_or_else(|| ApiError::not_found("team_not_found", format!("Team not found: {}", id)))?;

    Ok(Json(TeamResponse::from(&team)))
}

/// Delete a team
///
/// DELETE /api/teams/:id
pub async fn delete_team(
    State(ledger): State<Arc<Ledger>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ledger.remove_team(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
