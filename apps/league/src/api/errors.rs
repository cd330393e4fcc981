use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::ledger::LedgerError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    /// Creates a 409 Conflict error
    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, code, message)
    }

    /// Creates a 503 Service Unavailable error
    pub fn service_unavailable(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "code": self.code,
        }));

        (self.status, body).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InvalidTeamName(_) => Self::bad_request("invalid_team_name", message),
            LedgerError::DuplicateTeam(_) => Self::conflict("duplicate_team", message),
            LedgerError::TeamNotFound(_) => Self::not_found("team_not_found", message),
            LedgerError::SameTeam(_) => Self::bad_request("same_team", message),
            LedgerError::InvalidScore(_) => Self::bad_request("invalid_score", message),
            LedgerError::MatchNotFound(_) => Self::not_found("match_not_found", message),
            LedgerError::PersistenceFailure(_) => {
                Self::service_unavailable("persistence_failure", message)
            }
            LedgerError::IntegrityViolation(_) => {
                Self::internal_server_error("integrity_violation", message)
            }
        }
    }
}
