//! Unified error handling for the API.
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl is
//! the single place where failures become HTTP statuses and `{"error": ...}`
//! bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A path or body identifier is not structurally valid.
    #[error("Invalid ID Format.")]
    InvalidIdFormat,

    /// The lead identifier in the path is not structurally valid.
    #[error("Invalid Lead ID.")]
    InvalidLeadId,

    /// The sales agent identifier in the body is not structurally valid.
    #[error("Invalid Sales Agent ID.")]
    InvalidAgentId,

    /// One or more field constraints were violated. The message carries
    /// every violation, joined by ". ".
    #[error("{0}")]
    InvalidInput(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// A unique key (agent email, tag name) already exists.
    #[error("{0}")]
    DuplicateKey(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // Unique-key conflicts carry a client-facing message
            RepositoryError::Conflict(message) => Self::DuplicateKey(message),
            other => Self::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let status = match &self {
            Self::InvalidIdFormat
            | Self::InvalidLeadId
            | Self::InvalidAgentId
            | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateKey(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) => "Internal server error.".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
