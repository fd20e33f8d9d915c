//! Error types for the API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::{AuthError, Denial, IdentityError};
use crate::cache::SnapshotMismatch;
use crate::store::StoreError;

// == App Error Enum ==
/// Unified error type returned by request handlers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Lookup by id produced no record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential creation or role assignment was rejected
    #[error("Validation failed: {} error(s)", .0.len())]
    Validation(Vec<IdentityError>),

    /// Missing, unknown, or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but lacking the required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Persistence layer failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(errors) => AppError::Validation(errors),
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username or password".to_string())
            }
            AuthError::Hashing(msg) => AppError::Internal(msg),
            AuthError::Store(err) => AppError::Store(err),
        }
    }
}

impl From<SnapshotMismatch> for AppError {
    fn from(err: SnapshotMismatch) -> Self {
        tracing::error!(expected = err.expected, found = err.found, "cache key scheme collision");
        AppError::Internal(err.to_string())
    }
}

impl From<Denial> for AppError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated => {
                AppError::Unauthorized("Missing or invalid bearer token".to_string())
            }
            Denial::Forbidden { policy } => {
                AppError::Forbidden(format!("Policy '{}' requires a role you do not hold", policy))
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(errors) => {
                let body = Json(json!({ "errors": errors }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Store(err) => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, AppError>;
