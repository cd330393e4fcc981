use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use super::teams::TeamResponse;
use crate::ledger::Ledger;

/// One row of the standings table
#[derive(Debug, Serialize)]
pub struct StandingResponse {
    pub position: usize,
    #[serde(flatten)]
    pub team: TeamResponse,
}

/// Current standings, best team first
///
/// GET /api/standings
pub async fn get_standings(State(ledger): State<Arc<Ledger>>) -> Json<Vec<StandingResponse>> {
    let rows = ledger
        .standings_table()
        .await
        .iter()
        .map(|row| StandingResponse {
            position: row.position,
            team: TeamResponse::from(&row.team),
        })
        .collect();

    Json(rows)
}
