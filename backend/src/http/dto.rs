//! Data Transfer Objects for the HTTP API.
//!
//! Records and request bodies are shared with the core library; only the
//! shapes that exist purely for HTTP live here.

use serde::{Deserialize, Serialize};

pub use crate::api::{Event, EventPage, EventPayload, Participant, ParticipantPayload};
use crate::api::PageRequest;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// "connected" or "disconnected"
    pub database: String,
}

/// Query parameters for `GET /api/events`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListEventsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<ListEventsQuery> for PageRequest {
    fn from(query: ListEventsQuery) -> Self {
        PageRequest::new(query.limit, query.offset)
    }
}
