use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

use super::schema::{events, participants};
use crate::api::{Event, EventId, Participant, ParticipantId};
use crate::models::EventDraft;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written on insert and on full update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = events)]
#[diesel(treat_none_as_null = true)]
pub struct EventValues {
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub description: Option<String>,
}

impl From<&EventDraft> for EventValues {
    fn from(draft: &EventDraft) -> Self {
        Self {
            name: draft.name.clone(),
            date: draft.window.date,
            start_time: draft.window.start,
            end_time: draft.window.end,
            location: draft.window.location.clone(),
            description: draft.description.clone(),
        }
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: EventId::new(row.id),
            name: row.name,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            location: row.location,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = participants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParticipantRow {
    pub id: i64,
    pub email: String,
    pub event_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = participants)]
pub struct NewParticipantRow {
    pub email: String,
    pub event_id: i64,
}

impl From<ParticipantRow> for Participant {
    fn from(row: ParticipantRow) -> Self {
        Participant {
            id: ParticipantId::new(row.id),
            email: row.email,
            event_id: EventId::new(row.event_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
