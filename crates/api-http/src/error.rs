//! HTTP Error Types
//!
//! Maps application errors to status codes with an `{"error": message}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use promptmock_core::error::AppError;
use thiserror::Error;

use crate::types::ErrorResponse;

/// Body returned for unknown prompt ids
pub const PROMPT_NOT_FOUND: &str = "Prompt not found";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed submission body
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", PROMPT_NOT_FOUND)]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
