//! Error types for geoproc-lp
//!
//! `Error` covers service-level failures; `ApiError` is the HTTP-facing
//! subset rendered as `{"error": ...}` JSON bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geoproc_common::api::ErrorResponse;
use thiserror::Error;

/// Main error type for the location processor
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected before any processing
    #[error("{0}")]
    BadRequest(String),

    /// The worker pool was closed because the service is shutting down
    #[error("Service is shutting down")]
    ServiceShutdown,
}

impl From<geoproc_common::Error> for Error {
    fn from(err: geoproc_common::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Convenience Result type using the geoproc-lp Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned to HTTP clients
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input; no side effects were performed
    BadRequest(String),
    /// Request arrived after shutdown began
    Unavailable(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::BadRequest(msg) => ApiError::BadRequest(msg),
            Error::ServiceShutdown => ApiError::Unavailable(err.to_string()),
            Error::Config(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
