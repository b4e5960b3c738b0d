//! Unified error types for the blocklist API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core blocklist errors (normalization, store, lookups)
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::InvalidDomain(msg)) => {
                (StatusCode::BAD_REQUEST, "Invalid domain", Some(msg.clone()))
            }
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (
                AppError::Domain(DomainError::InvalidDomain("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Domain(DomainError::NotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Domain(DomainError::Conflict("x".into())),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Domain(DomainError::Validation("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Domain(DomainError::Database("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn domain_error_converts_into_app_error() {
        let app: AppError = DomainError::Conflict("spam.test".into()).into();
        assert!(matches!(app, AppError::Domain(DomainError::Conflict(_))));
        assert_eq!(app.to_string(), "Conflict: spam.test");
    }
}
