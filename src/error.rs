//! Error types for the session store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Session Error Enum ==
/// Unified error type for the session store.
///
/// Absent keys and absent session ids are not errors for the store engine
/// itself; `NotFound` is only raised by strict lookups.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Init was called for an id that is already live
    #[error("Session already exists: {0}")]
    DuplicateId(String),

    /// Strict lookup found no live session
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No provider registered under the requested name
    #[error("Unknown session provider: {0}")]
    UnknownProvider(String),

    /// A provider name was registered twice
    #[error("Session provider already registered: {0}")]
    DuplicateProvider(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = match &self {
            SessionError::DuplicateId(_) => StatusCode::CONFLICT,
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
            SessionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SessionError::UnknownProvider(_) | SessionError::DuplicateProvider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the session store.
pub type Result<T> = std::result::Result<T, SessionError>;
