use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::label::{GenerationError, ValidationError};
use crate::reporting::{ErrorKind, ErrorReport};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Generation(_) => ErrorKind::Generation,
        }
    }

    /// The report for this error, carrying the internal message.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport::new(self.kind(), self.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Only fixed public messages reach the client.
        let (status, code, message) = match &self {
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid payload format",
            ),
            AppError::Generation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GENERATION_ERROR",
                "Error generating PDF",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
