//! High-level event and participant operations.
//!
//! These functions work with any implementation of the repository traits and
//! report [`SchedulingError`] so callers see one taxonomy regardless of
//! backend. Conflict-checked writes are not here; they go through
//! [`crate::services::AdmissionController`].
//!
//! # Usage
//!
//! ```no_run
//! use venue_events::api::PageRequest;
//! use venue_events::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let page = services::list_events(&repo, PageRequest::default()).await?;
//!     println!("Found {} events", page.count);
//!     Ok(())
//! }
//! ```

use log::{debug, info, warn};

use super::repository::FullRepository;
use crate::api::{Event, EventId, EventPage, PageRequest, Participant, ParticipantId};
use crate::services::error::{SchedulingError, SchedulingResult};

// ==================== Health & Connection ====================

/// Check if the storage backend is healthy.
///
/// A failing check is reported as `Ok(false)` rather than an error so that
/// health endpoints can always answer.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> bool {
    match repo.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            warn!("Health check failed: {}", e);
            false
        }
    }
}

// ==================== Event Operations ====================

/// List one page of events with the total count.
pub async fn list_events<R: FullRepository + ?Sized>(
    repo: &R,
    page: PageRequest,
) -> SchedulingResult<EventPage> {
    debug!("Listing events limit={} offset={}", page.limit, page.offset);
    Ok(repo.list_events(page).await?)
}

/// Fetch one event.
pub async fn get_event<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
) -> SchedulingResult<Event> {
    Ok(repo.get_event(event_id).await?)
}

/// Delete an event together with its participants.
pub async fn delete_event<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
) -> SchedulingResult<()> {
    repo.delete_event(event_id).await?;
    info!("Deleted event {}", event_id);
    Ok(())
}

// ==================== Participant Operations ====================

/// Register `email` for an event.
///
/// Emails are unique across all events. The event must exist.
pub async fn add_participant<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
    email: &str,
) -> SchedulingResult<Participant> {
    repo.get_event(event_id).await?;

    if repo.find_participant_by_email(email).await?.is_some() {
        return Err(SchedulingError::validation(format!(
            "email {} is already registered",
            email
        )));
    }

    let participant = repo.insert_participant(event_id, email).await?;
    info!(
        "Registered participant {} for event {}",
        participant.id, event_id
    );
    Ok(participant)
}

/// Remove one participant by its own identifier.
pub async fn remove_participant<R: FullRepository + ?Sized>(
    repo: &R,
    participant_id: ParticipantId,
) -> SchedulingResult<()> {
    repo.delete_participant(participant_id).await?;
    info!("Removed participant {}", participant_id);
    Ok(())
}

/// All participants of an existing event.
pub async fn list_participants<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
) -> SchedulingResult<Vec<Participant>> {
    Ok(repo.participants_for_event(event_id).await?)
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod tests;
