//! Application error types and result alias.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// No valid session
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// The caller's role does not allow viewing the requested content
    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),

    /// The action is disallowed even though the content itself is viewable
    /// (e.g. downloading a report generated without download rights)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource missing, or not owned by the caller
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Resource exists but is past its expiry
    #[error("Expired: {0}")]
    Expired(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error (startup plumbing; never produced by request handlers)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bind address parse error
    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg.clone()),
            // Driver errors are logged below; callers get a generic message.
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            AppError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", msg.clone())
            }
            AppError::InsufficientPermissions(msg) => (
                StatusCode::FORBIDDEN,
                "INSUFFICIENT_PERMISSIONS",
                msg.clone(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Expired(msg) => (StatusCode::GONE, "EXPIRED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                "IO operation failed".to_string(),
            ),
            AppError::AddrParse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "Invalid bind address".to_string(),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        // Log the error
        tracing::error!(error = %self, code = code, "Request error");

        let body = Json(json!({
            "code": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
