//! API error type and its JSON rendering

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rentbook_core::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, field) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::debug!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthorized", msg, None)
            }
            ApiError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg, None)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::BAD_REQUEST, "Conflict", msg, None)
            }
            ApiError::Validation { field, message } => {
                tracing::warn!("Validation failed on {}: {}", field, message);
                (StatusCode::BAD_REQUEST, "ValidationError", message, Some(field))
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type,
            message,
            field,
        });

        (status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            DomainError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            DomainError::UsernameTaken(_) => ApiError::Conflict("Username already exists".to_string()),
            DomainError::BillAlreadyExists { .. } => ApiError::Conflict(err.to_string()),
            DomainError::TenantNotFound | DomainError::BillNotFound => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::Validation { field, message } => ApiError::Validation { field, message },
            DomainError::PasswordHashError(_) | DomainError::InternalError(_) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            field: "body".to_string(),
            message: rejection.body_text(),
        }
    }
}

/// Only reachable when a route lacks its `{id}` segment.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InternalError(rejection.body_text())
    }
}
