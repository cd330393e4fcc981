use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health, matches, standings, teams};
use crate::ledger::Ledger;

/// Builds the HTTP router over a shared ledger
pub fn router(ledger: Arc<Ledger>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Standings
        .route("/api/standings", get(standings::get_standings))
        // Team routes
        .route("/api/teams", post(teams::create_team))
        .route("/api/teams/:id", get(teams::get_team))
        .route("/api/teams/:id", delete(teams::delete_team))
        .route("/api/teams/:id/matches", get(matches::list_team_matches))
        // Match routes
        .route("/api/matches", get(matches::list_matches))
        .route("/api/matches", post(matches::record_match))
        .route("/api/matches/by-name", post(matches::record_match_by_names))
        .route("/api/matches/:id", delete(matches::delete_match))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(ledger)
}
