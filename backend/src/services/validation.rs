//! Request payload validation.
//!
//! Payloads arrive as optional strings. Parsing happens here, once, so that
//! the admission controller and storage only ever see typed values.

use chrono::{NaiveDate, NaiveTime};

use super::error::{SchedulingError, SchedulingResult};
use crate::api::{EventPayload, ParticipantPayload};
use crate::models::{EventDraft, TimeWindow};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

fn required<'a>(field: &str, value: &'a Option<String>) -> SchedulingResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SchedulingError::validation(format!("{} is required", field))),
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(field: &str, value: &str) -> SchedulingResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        SchedulingError::validation(format!("{} must be a date in YYYY-MM-DD format", field))
    })
}

/// Parse a time of day in `HH:MM:SS` or `HH:MM` form.
pub fn parse_time(field: &str, value: &str) -> SchedulingResult<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| {
            SchedulingError::validation(format!("{} must be a time in HH:MM:SS format", field))
        })
}

/// Validate a create/update payload into an [`EventDraft`].
///
/// `name`, `date`, `startTime`, `endTime` and `location` are required and
/// must be non-blank. A blank `description` is stored as absent. The window
/// may be an instant (`startTime == endTime`) but must not run backwards.
pub fn parse_event_payload(payload: &EventPayload) -> SchedulingResult<EventDraft> {
    let name = required("name", &payload.name)?;
    let date = parse_date("date", required("date", &payload.date)?)?;
    let start = parse_time("startTime", required("startTime", &payload.start_time)?)?;
    let end = parse_time("endTime", required("endTime", &payload.end_time)?)?;
    let location = required("location", &payload.location)?;

    if end < start {
        return Err(SchedulingError::validation(
            "endTime must not be earlier than startTime",
        ));
    }

    let description = payload
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(EventDraft::new(
        name,
        TimeWindow::new(location, date, start, end),
        description,
    ))
}

/// Check that `email` looks like `local@domain`.
pub fn validate_email(email: &str) -> SchedulingResult<()> {
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(SchedulingError::validation(format!(
            "email '{}' is not a valid address",
            email
        ))),
    }
}

/// Validate a participant payload, returning the trimmed email.
pub fn parse_participant_payload(payload: &ParticipantPayload) -> SchedulingResult<String> {
    let email = required("email", &payload.email)?;
    validate_email(email)?;
    Ok(email.to_string())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
