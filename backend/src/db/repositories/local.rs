//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository traits
//! suitable for unit testing and local development. All data lives in ordered
//! maps behind a single lock, giving fast, deterministic, isolated execution.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{Event, EventId, EventPage, PageRequest, Participant, ParticipantId};
use crate::db::repository::*;
use crate::models::EventDraft;

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same data.
///
/// # Example
/// ```
/// use venue_events::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.event_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    events: BTreeMap<EventId, Event>,
    participants: BTreeMap<ParticipantId, Participant>,

    // ID counters
    next_event_id: i64,
    next_participant_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            events: BTreeMap::new(),
            participants: BTreeMap::new(),
            next_event_id: 1,
            next_participant_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository. ID counters restart at 1.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of events stored.
    pub fn event_count(&self) -> usize {
        self.data.read().events.len()
    }

    /// Get the number of participants stored.
    pub fn participant_count(&self) -> usize {
        self.data.read().participants.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_draft(event: &mut Event, draft: &EventDraft) {
    event.name = draft.name.clone();
    event.date = draft.window.date;
    event.start_time = draft.window.start;
    event.end_time = draft.window.end;
    event.location = draft.window.location.clone();
    event.description = draft.description.clone();
}

#[async_trait]
impl EventRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_event(&self, draft: &EventDraft) -> RepositoryResult<Event> {
        self.check_health("insert_event")?;

        let mut data = self.data.write();
        let id = EventId::new(data.next_event_id);
        data.next_event_id += 1;

        let now = Utc::now();
        let event = Event {
            id,
            name: draft.name.clone(),
            date: draft.window.date,
            start_time: draft.window.start,
            end_time: draft.window.end,
            location: draft.window.location.clone(),
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
        };
        data.events.insert(id, event.clone());

        Ok(event)
    }

    async fn get_event(&self, event_id: EventId) -> RepositoryResult<Event> {
        self.check_health("get_event")?;

        self.data
            .read()
            .events
            .get(&event_id)
            .cloned()
            .ok_or_else(|| RepositoryError::entity_not_found("get_event", "Event", event_id))
    }

    async fn update_event(&self, event_id: EventId, draft: &EventDraft) -> RepositoryResult<Event> {
        self.check_health("update_event")?;

        let mut data = self.data.write();
        let event = data
            .events
            .get_mut(&event_id)
            .ok_or_else(|| RepositoryError::entity_not_found("update_event", "Event", event_id))?;

        apply_draft(event, draft);
        event.updated_at = Utc::now();

        Ok(event.clone())
    }

    async fn delete_event(&self, event_id: EventId) -> RepositoryResult<()> {
        self.check_health("delete_event")?;

        let mut data = self.data.write();
        if data.events.remove(&event_id).is_none() {
            return Err(RepositoryError::entity_not_found(
                "delete_event",
                "Event",
                event_id,
            ));
        }

        // Cascade to the event's participants
        data.participants.retain(|_, p| p.event_id != event_id);

        Ok(())
    }

    async fn list_events(&self, page: PageRequest) -> RepositoryResult<EventPage> {
        self.check_health("list_events")?;

        let data = self.data.read();
        let rows = data
            .events
            .values()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();

        Ok(EventPage {
            count: data.events.len() as u64,
            rows,
        })
    }

    async fn events_at(&self, location: &str, date: NaiveDate) -> RepositoryResult<Vec<Event>> {
        self.check_health("events_at")?;

        Ok(self
            .data
            .read()
            .events
            .values()
            .filter(|e| e.location == location && e.date == date)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ParticipantRepository for LocalRepository {
    async fn insert_participant(
        &self,
        event_id: EventId,
        email: &str,
    ) -> RepositoryResult<Participant> {
        self.check_health("insert_participant")?;

        let mut data = self.data.write();
        if !data.events.contains_key(&event_id) {
            return Err(RepositoryError::entity_not_found(
                "insert_participant",
                "Event",
                event_id,
            ));
        }
        if data.participants.values().any(|p| p.email == email) {
            return Err(RepositoryError::validation_with_context(
                format!("email {} is already registered", email),
                ErrorContext::new("insert_participant")
                    .with_entity("Participant")
                    .with_details("participants_email_key"),
            ));
        }

        let id = ParticipantId::new(data.next_participant_id);
        data.next_participant_id += 1;

        let now = Utc::now();
        let participant = Participant {
            id,
            email: email.to_string(),
            event_id,
            created_at: now,
            updated_at: now,
        };
        data.participants.insert(id, participant.clone());

        Ok(participant)
    }

    async fn get_participant(
        &self,
        participant_id: ParticipantId,
    ) -> RepositoryResult<Participant> {
        self.check_health("get_participant")?;

        self.data
            .read()
            .participants
            .get(&participant_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::entity_not_found("get_participant", "Participant", participant_id)
            })
    }

    async fn find_participant_by_email(
        &self,
        email: &str,
    ) -> RepositoryResult<Option<Participant>> {
        self.check_health("find_participant_by_email")?;

        Ok(self
            .data
            .read()
            .participants
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn delete_participant(&self, participant_id: ParticipantId) -> RepositoryResult<()> {
        self.check_health("delete_participant")?;

        match self.data.write().participants.remove(&participant_id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::entity_not_found(
                "delete_participant",
                "Participant",
                participant_id,
            )),
        }
    }

    async fn participants_for_event(
        &self,
        event_id: EventId,
    ) -> RepositoryResult<Vec<Participant>> {
        self.check_health("participants_for_event")?;

        let data = self.data.read();
        if !data.events.contains_key(&event_id) {
            return Err(RepositoryError::entity_not_found(
                "participants_for_event",
                "Event",
                event_id,
            ));
        }

        Ok(data
            .participants
            .values()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect())
    }
}
