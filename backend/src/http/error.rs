//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Malformed query parameters
    BadRequest(String),
    /// Repository error outside of generation
    Repository(RepositoryError),
    /// Timetable generation could not be completed; the previous run is kept
    Generation(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Repository(e) if e.is_retryable() => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("REPOSITORY_UNAVAILABLE", e.to_string()),
            ),
            AppError::Repository(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("REPOSITORY_ERROR", e.to_string()),
            ),
            AppError::Generation(e) => {
                // Storage details stay in the log; clients get a generic failure.
                error!("Timetable generation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("GENERATION_FAILED", "Failed to generate schedule"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Repository(RepositoryError::connection(
                    "down",
                    ErrorContext::new("list_runs"),
                )),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Repository(RepositoryError::configuration("bad type")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Generation(RepositoryError::transaction(
                    "rejected",
                    ErrorContext::new("commit_run"),
                )),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_api_error_omits_empty_details() {
        let body = serde_json::to_value(ApiError::new("BAD_REQUEST", "nope")).unwrap();
        assert!(body.get("details").is_none());

        let body =
            serde_json::to_value(ApiError::new("BAD_REQUEST", "nope").with_details("day")).unwrap();
        assert_eq!(body["details"], "day");
    }
}
