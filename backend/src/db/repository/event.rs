//! Event repository trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::api::{Event, EventId, EventPage, PageRequest};
use crate::models::EventDraft;

/// Repository trait for event storage.
///
/// Implementations persist events as given. They do not check windows for
/// overlap; that is the admission controller's job, which reads the committed
/// set through [`EventRepository::events_at`] first.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait EventRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the storage backend is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Event Operations ====================

    /// Persist a new event and return it with its assigned identity.
    async fn insert_event(&self, draft: &EventDraft) -> RepositoryResult<Event>;

    /// Retrieve an event by ID.
    ///
    /// # Returns
    /// * `Ok(Event)` - The stored event
    /// * `Err(RepositoryError::NotFound)` - If the event doesn't exist
    async fn get_event(&self, event_id: EventId) -> RepositoryResult<Event>;

    /// Replace every field of an existing event with the draft's values.
    ///
    /// # Returns
    /// * `Ok(Event)` - The event after the update (`updated_at` refreshed)
    /// * `Err(RepositoryError::NotFound)` - If the event doesn't exist
    async fn update_event(&self, event_id: EventId, draft: &EventDraft) -> RepositoryResult<Event>;

    /// Delete an event. Its participants are deleted with it.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the event doesn't exist
    async fn delete_event(&self, event_id: EventId) -> RepositoryResult<()>;

    /// List one page of events in ascending ID order, with the total count.
    async fn list_events(&self, page: PageRequest) -> RepositoryResult<EventPage>;

    /// Fetch every event at `location` on `date`.
    ///
    /// This is an equality lookup on `(location, date)`; the result is the
    /// committed set a candidate window is checked against.
    async fn events_at(&self, location: &str, date: NaiveDate) -> RepositoryResult<Vec<Event>>;
}
