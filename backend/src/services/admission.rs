//! Conflict-checked admission of event writes.
//!
//! ```text
//! draft ──► events_at(location, date) ──► find_conflicting_event
//!                                              │
//!                          conflict ◄──────────┼──────────► insert / update
//! ```
//!
//! The check and the write are two storage calls. Two concurrent requests can
//! both pass the check before either writes; a sequential caller can never
//! commit two overlapping windows.

use std::sync::Arc;

use log::{info, warn};

use super::error::{SchedulingError, SchedulingResult};
use crate::algorithms::find_conflicting_event;
use crate::api::{Event, EventId};
use crate::db::repository::FullRepository;
use crate::models::{EventDraft, TimeWindow};

/// Admits event creates and updates whose windows are free.
#[derive(Clone)]
pub struct AdmissionController {
    repository: Arc<dyn FullRepository>,
}

impl AdmissionController {
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self { repository }
    }

    /// Reject `draft` if it overlaps a committed event other than `exclude`.
    async fn check_window(
        &self,
        draft: &EventDraft,
        exclude: Option<EventId>,
    ) -> SchedulingResult<()> {
        let window = &draft.window;
        let committed: Vec<(EventId, TimeWindow)> = self
            .repository
            .events_at(&window.location, window.date)
            .await?
            .into_iter()
            .filter(|e| Some(e.id) != exclude)
            .map(|e| (e.id, e.window()))
            .collect();

        if let Some(report) = find_conflicting_event(window, &committed) {
            warn!(
                "Rejected window {}-{} at '{}' on {}: overlaps event {} ({}-{})",
                window.start,
                window.end,
                window.location,
                window.date,
                report.event_id,
                report.window.start,
                report.window.end
            );
            return Err(SchedulingError::Conflict {
                location: window.location.clone(),
                date: window.date,
                conflicting: Some(report.event_id),
            });
        }

        Ok(())
    }

    /// Create an event if its window is free.
    ///
    /// On conflict nothing is written.
    pub async fn admit_create(&self, draft: &EventDraft) -> SchedulingResult<Event> {
        self.check_window(draft, None).await?;

        let event = self.repository.insert_event(draft).await?;
        info!(
            "Admitted event {} '{}' at '{}' on {} ({}-{})",
            event.id, event.name, event.location, event.date, event.start_time, event.end_time
        );
        Ok(event)
    }

    /// Replace every field of `event_id` with `draft` if the new window is
    /// free of every other event.
    ///
    /// The event's own current window never counts against it, so an update
    /// that keeps the same time slot always passes the check.
    pub async fn admit_update(
        &self,
        event_id: EventId,
        draft: &EventDraft,
    ) -> SchedulingResult<Event> {
        self.repository.get_event(event_id).await?;
        self.check_window(draft, Some(event_id)).await?;

        let event = self.repository.update_event(event_id, draft).await?;
        info!(
            "Updated event {} '{}' at '{}' on {} ({}-{})",
            event.id, event.name, event.location, event.date, event.start_time, event.end_time
        );
        Ok(event)
    }
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod tests;
