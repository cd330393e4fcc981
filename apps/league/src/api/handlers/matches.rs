use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::domain::matches::{Match, MatchOutcome};
use crate::ledger::Ledger;

/// Request body for recording a result
///
/// Scores are signed so that a negative value reaches the ledger and is
/// reported as `invalid_score` instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct RecordMatchRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: i64,
    pub away_score: i64,
    /// Defaults to the time of the request
    pub played_at: Option<DateTime<Utc>>,
}

/// Match as returned by the API
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: u32,
    pub away_score: u32,
    pub outcome: MatchOutcome,
    pub played_at: DateTime<Utc>,
}

impl From<&Match> for MatchResponse {
    fn from(game: &Match) -> Self {
        Self {
            id: game.id(),
            home_team_id: game.home_team_id(),
            away_team_id: game.away_team_id(),
            home_score: game.home_score().value(),
            away_score: game.away_score().value(),
            outcome: game.outcome(),
            played_at: game.played_at(),
        }
    }
}

/// Record a match result
///
/// POST /api/matches
pub async fn record_match(
    State(ledger): State<Arc<Ledger>>,
    Json(req): Json<RecordMatchRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let played_at = req.played_at.unwrap_or_else(Utc::now);
    let id = ledger
        .record_match(
            req.home_team_id,
            req.away_team_id,
            req.home_score,
            req.away_score,
            played_at,
        )
        .await?;

    created(&ledger, id).await
}

/// Request body for recording a result typed in by hand
#[derive(Debug, Deserialize)]
pub struct RecordMatchByNamesRequest {
    pub home_team: String,
    pub away_team: String,
    pub home_score: String,
    pub away_score: String,
    pub played_at: Option<DateTime<Utc>>,
}

/// Record a match result using team names and textual scores
///
/// POST /api/matches/by-name
pub async fn record_match_by_names(
    State(ledger): State<Arc<Ledger>>,
    Json(req): Json<RecordMatchByNamesRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let played_at = req.played_at.unwrap_or_else(Utc::now);
    let id = ledger
        .record_match_by_names(
            &req.home_team,
            &req.away_team,
            &req.home_score,
            &req.away_score,
            played_at,
        )
        .await?;

    created(&ledger, id).await
}

async fn created(ledger: &Ledger, id: Uuid) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let game = ledger
        .match_record(id)
        .await
        .ok_or_else(|| ApiError::not_found("match_not_found", format!("Match not found: {}", id)))?;

    Ok((StatusCode::CREATED, Json(MatchResponse::from(&game))))
}

/// All matches, most recent first
///
/// GET /api/matches
pub async fn list_matches(State(ledger): State<Arc<Ledger>>) -> Json<Vec<MatchResponse>> {
    let matches = ledger
        .list_matches()
        .await
        .iter()
        .map(MatchResponse::from)
        .collect();

    Json(matches)
}

/// Matches a team played in, most recent first
///
/// GET /api/teams/:id/matches
pub async fn list_team_matches(
    State(ledger): State<Arc<Ledger>>,
    Path(team_id): Path<Uuid>,
) -> Json<Vec<MatchResponse>> {
    let matches = ledger
        .matches_for_team(team_id)
        .await
        .iter()
        .map(MatchResponse::from)
        .collect();

    Json(matches)
}

/// Delete a match and reverse its effect on the standings
///
/// DELETE /api/matches/:id
pub async fn delete_match(
    State(ledger): State<Arc<Ledger>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ledger.remove_match(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
