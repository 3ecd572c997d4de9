//! Application error type mapping to HTTP status codes and the
//! `{ "message", "code" }` error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use legalassist_core::chat::service::ChatError;

/// Body text for any 500 response. Details go to the log only.
pub const INTERNAL_ERROR_MESSAGE: &str = "Failed to process your request. Please try again.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or incomplete input (400).
    Validation(String),
    /// The addressed resource does not exist (404).
    NotFound(String),
    /// Anything unexpected (500). The string is logged, never sent.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Validation(msg) => AppError::Validation(msg),
            ChatError::NotFound(_) => AppError::NotFound("Message not found".to_string()),
            ChatError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message, "code": code }))).into_response()
    }
}
