//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. Extractor rejections (malformed JSON, non-numeric ids, bad query
//! strings) are turned into [`AppError::BadRequest`] so every error response
//! shares the same body shape.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use super::dto::{
    Event, EventPage, EventPayload, HealthResponse, ListEventsQuery, Participant,
    ParticipantPayload,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{EventId, ParticipantId};
use crate::db::services as db_services;
use crate::services::validation;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a resource.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

fn event_id(path: Result<Path<i64>, PathRejection>) -> Result<EventId, AppError> {
    let Path(id) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(EventId::new(id))
}

fn body<T>(json: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    json.map(|Json(value)| value)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = if db_services::health_check(state.repository.as_ref()).await {
        "connected"
    } else {
        "disconnected"
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    }))
}

// =============================================================================
// Events
// =============================================================================

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> CreatedResult<Event> {
    let draft = validation::parse_event_payload(&body(payload)?)?;
    let event = state.admission.admit_create(&draft).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events?limit=&offset=
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<ListEventsQuery>, QueryRejection>,
) -> HandlerResult<EventPage> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let page = db_services::list_events(state.repository.as_ref(), query.into()).await?;
    Ok(Json(page))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult<Event> {
    let event = db_services::get_event(state.repository.as_ref(), event_id(path)?).await?;
    Ok(Json(event))
}

/// PUT /api/events/{id}
///
/// Full replacement: every required field must be present. A missing event
/// is reported before the body is validated.
pub async fn update_event(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> HandlerResult<Event> {
    let id = event_id(path)?;
    db_services::get_event(state.repository.as_ref(), id).await?;
    let draft = validation::parse_event_payload(&body(payload)?)?;
    let event = state.admission.admit_update(id, &draft).await?;
    Ok(Json(event))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    db_services::delete_event(state.repository.as_ref(), event_id(path)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Participants
// =============================================================================

/// GET /api/events/{id}/participants
pub async fn list_participants(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult<Vec<Participant>> {
    let participants =
        db_services::list_participants(state.repository.as_ref(), event_id(path)?).await?;
    Ok(Json(participants))
}

/// POST /api/events/{id}/participants
pub async fn add_participant(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ParticipantPayload>, JsonRejection>,
) -> CreatedResult<Participant> {
    let id = event_id(path)?;
    let email = validation::parse_participant_payload(&body(payload)?)?;
    let participant = db_services::add_participant(state.repository.as_ref(), id, &email).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// DELETE /api/events/{id}/participants/{participantId}
///
/// The participant is looked up by its own id; the event segment is not
/// cross-checked.
pub async fn remove_participant(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((_event_id, participant_id)) =
        path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::debug!("Removing participant {}", participant_id);
    db_services::remove_participant(
        state.repository.as_ref(),
        ParticipantId::new(participant_id),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
