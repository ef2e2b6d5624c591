//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::SchedulingError;

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
    /// Overlapping window at the same location and date
    Conflict { message: String, details: String },
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Conflict { message, details } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("TIME_CONFLICT", message).with_details(details),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("VALIDATION_ERROR", msg),
            ),
            AppError::Repository(e) => {
                tracing::error!("Repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("REPOSITORY_ERROR", e.message()),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::Conflict {
                ref location,
                date,
                conflicting,
            } => {
                let details = match conflicting {
                    Some(id) => format!(
                        "location={}, date={}, conflictingEventId={}",
                        location, date, id
                    ),
                    None => format!("location={}, date={}", location, date),
                };
                AppError::Conflict {
                    message: err.to_string(),
                    details,
                }
            }
            SchedulingError::NotFound { .. } => AppError::NotFound(err.to_string()),
            SchedulingError::Validation(msg) => AppError::BadRequest(msg),
            SchedulingError::Repository(e) => AppError::Repository(e),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        SchedulingError::from(err).into()
    }
}
