//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Payload too large
    #[error("Payload too large")]
    PayloadTooLarge,
}

/// Error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub response_type: String,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::PayloadTooLarge => "invalid_request_error",
            AppError::NotFound(_) => "not_found_error",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            response_type: "error".to_string(),
            error: ErrorBody {
                error_type: self.error_type().to_string(),
                message: self.to_string(),
            },
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!("Client error: {} - Status code: {}", self, status);

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    /// Create validation error
    pub fn validation_error(message: impl Into<String>) -> AppError {
        AppError::Validation(message.into())
    }

    /// Create not found error
    pub fn not_found_error(message: impl Into<String>) -> AppError {
        AppError::NotFound(message.into())
    }
}

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add validation error context
    fn validation_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn validation_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Validation(format!("{}: {}", message, e)))
    }
}
