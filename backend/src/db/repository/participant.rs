//! Participant repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{EventId, Participant, ParticipantId};

/// Repository trait for participant records.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Register `email` for an existing event.
    ///
    /// # Returns
    /// * `Ok(Participant)` - The created record
    /// * `Err(RepositoryError::NotFound)` - If the event doesn't exist
    /// * `Err(RepositoryError::ValidationError)` - If the email is already registered
    ///   anywhere (uniqueness is global, not per event)
    async fn insert_participant(
        &self,
        event_id: EventId,
        email: &str,
    ) -> RepositoryResult<Participant>;

    /// Retrieve a participant by ID.
    async fn get_participant(&self, participant_id: ParticipantId)
        -> RepositoryResult<Participant>;

    /// Look up a participant by email.
    async fn find_participant_by_email(&self, email: &str)
        -> RepositoryResult<Option<Participant>>;

    /// Delete one participant. Siblings and the owning event are untouched.
    async fn delete_participant(&self, participant_id: ParticipantId) -> RepositoryResult<()>;

    /// All participants of an event, in ascending ID order.
    async fn participants_for_event(&self, event_id: EventId)
        -> RepositoryResult<Vec<Participant>>;
}
