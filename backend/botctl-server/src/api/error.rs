//! REST API error types
//!
//! Every error renders as `{ "error": { "code", "message" } }` with a
//! matching HTTP status.

use botctl_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "INVALID_TOKEN")
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or wrong admin token (403)
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Expected traffic from scanners and stale bookmarks
            ApiError::Forbidden { .. } => log::warn!("{}", self),
            _ => log::error!("{}", self),
        }

        let (status, body) = match self {
            ApiError::Forbidden { code, message, .. } => (
                StatusCode::FORBIDDEN,
                ApiErrorBody {
                    code: code.into(),
                    message,
                },
            ),
            ApiError::BadRequest { message, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".into(),
                    message,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Authorization failures never say which part of the token was wrong.
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let message = match e {
            AuthError::MissingToken { .. } => "Access denied: admin token required",
            AuthError::InvalidToken { .. } => "Access denied: invalid admin token",
        };

        ApiError::Forbidden {
            code: e.error_code(),
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// A blocking supervisor call panicked or was cancelled.
impl From<tokio::task::JoinError> for ApiError {
    #[track_caller]
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal {
            message: format!("Supervisor task failed: {e}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
