//! Records and payloads shared by the service, storage and HTTP layers.
//!
//! Records (`Event`, `Participant`, `EventPage`) are what storage returns and
//! what clients receive. Payloads (`EventPayload`, `ParticipantPayload`) are the
//! loosely typed request bodies; they only become usable after
//! [`crate::services::validation`] turns them into typed drafts.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TimeWindow;

/// Event identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub i64);

/// Participant identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub i64);

impl EventId {
    pub fn new(value: i64) -> Self {
        EventId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl ParticipantId {
    pub fn new(value: i64) -> Self {
        ParticipantId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EventId> for i64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl From<ParticipantId> for i64 {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

/// A scheduled event as persisted by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// Calendar date, no time component
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Project the event onto the window it occupies.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(
            self.location.clone(),
            self.date,
            self.start_time,
            self.end_time,
        )
    }
}

/// A participant registered to an event. Emails are unique across all events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub email: String,
    pub event_id: EventId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of events plus the total number of stored events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    pub count: u64,
    pub rows: Vec<Event>,
}

/// Page window for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Raw event body for create and update requests.
///
/// Every field is optional here; presence and format are checked by
/// [`crate::services::validation::parse_event_payload`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Raw participant body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantPayload {
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_camel_case() {
        let now = Utc::now();
        let event = Event {
            id: EventId::new(1),
            name: "Test Event".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            location: "Test Location".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["date"], "2024-09-15");
        assert_eq!(json["startTime"], "10:00:00");
        assert_eq!(json["endTime"], "12:00:00");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 0);

        let page = PageRequest::new(Some(5), Some(20));
        assert_eq!(page.limit, 5);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn test_payload_accepts_missing_fields() {
        let payload: EventPayload = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("x"));
        assert!(payload.date.is_none());
        assert!(payload.start_time.is_none());
    }
}
