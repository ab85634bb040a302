use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

use crate::schemas::ErrorResponse;

/// Request-level failures, mapped to HTTP statuses at the facade
/// boundary. Handlers return these instead of panicking or leaking
/// driver errors to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request fields.
    #[error("{0}")]
    Validation(String),

    /// Unique-key conflict, i.e. a duplicate username.
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials. Carries no detail: unknown users and wrong
    /// passwords must be indistinguishable to the client.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Any persistence failure. The driver detail stays in the logs.
    #[error("database error: {0}")]
    Store(#[from] DbErr),

    /// Report generation failure.
    #[error("report error: {0}")]
    Report(#[from] compute::ComputeError),

    /// Token signing failure.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure.
    #[error("hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "USERNAME_ALREADY_EXISTS"),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::Report(_) => (StatusCode::INTERNAL_SERVER_ERROR, "REPORT_ERROR"),
            ApiError::Token(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_ERROR"),
            ApiError::Hash(_) => (StatusCode::INTERNAL_SERVER_ERROR, "HASH_ERROR"),
        }
    }

    /// Client-facing message. Internal failures collapse to a generic
    /// line; the cause has already been logged.
    fn client_message(&self) -> String {
        match self {
            ApiError::Validation(message) | ApiError::Conflict(message) => message.clone(),
            ApiError::InvalidCredentials => "Invalid credentials".to_string(),
            ApiError::Store(_) | ApiError::Report(_) | ApiError::Token(_) | ApiError::Hash(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {self}");
        }

        let body = ErrorResponse {
            error: self.client_message(),
            code: code.to_string(),
            success: false,
        };

        (status, Json(body)).into_response()
    }
}
