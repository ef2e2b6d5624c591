//! Error taxonomy for scheduling operations.

use chrono::NaiveDate;

use crate::api::EventId;
use crate::db::repository::RepositoryError;

/// Result type for scheduling operations.
pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Errors reported by the admission controller and the event services.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    /// The candidate window overlaps a committed event at the same location
    /// and date.
    #[error("Time conflict at the same location")]
    Conflict {
        location: String,
        date: NaiveDate,
        conflicting: Option<EventId>,
    },

    #[error("{entity} not found")]
    NotFound { entity: String, id: String },

    /// Missing, blank or malformed input, or data storage refused.
    #[error("{0}")]
    Validation(String),

    /// Infrastructure failure. The message is not meant for clients.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl SchedulingError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<RepositoryError> for SchedulingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { context, .. } => SchedulingError::NotFound {
                entity: context.entity.unwrap_or_else(|| "Record".to_string()),
                id: context.entity_id.unwrap_or_default(),
            },
            RepositoryError::ValidationError { message, .. } => SchedulingError::Validation(message),
            other => SchedulingError::Repository(other),
        }
    }
}
