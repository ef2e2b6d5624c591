use super::*;

fn payload(date: &str, start: &str, end: &str) -> EventPayload {
    EventPayload {
        name: Some("Rust Meetup".into()),
        date: Some(date.into()),
        start_time: Some(start.into()),
        end_time: Some(end.into()),
        location: Some("Test Location".into()),
        description: Some("Monthly meetup".into()),
    }
}

fn expect_validation(result: SchedulingResult<EventDraft>) -> String {
    match result {
        Err(SchedulingError::Validation(msg)) => msg,
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_valid_payload_becomes_draft() {
    let draft = parse_event_payload(&payload("2024-09-15", "10:00:00", "12:00:00")).unwrap();

    assert_eq!(draft.name, "Rust Meetup");
    assert_eq!(draft.location(), "Test Location");
    assert_eq!(draft.window.date, NaiveDate::from_ymd_opt(2024, 9, 15).unwrap());
    assert_eq!(draft.window.start, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    assert_eq!(draft.window.end, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    assert_eq!(draft.description.as_deref(), Some("Monthly meetup"));
}

#[test]
fn test_short_time_format_accepted() {
    let draft = parse_event_payload(&payload("2024-09-15", "09:30", "10:45")).unwrap();
    assert_eq!(draft.window.start, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
}

#[test]
fn test_instant_window_accepted() {
    let draft = parse_event_payload(&payload("2024-09-15", "12:00:00", "12:00:00")).unwrap();
    assert_eq!(draft.window.start, draft.window.end);
}

#[test]
fn test_end_before_start_rejected() {
    let msg = expect_validation(parse_event_payload(&payload(
        "2024-09-15",
        "13:00:00",
        "11:00:00",
    )));
    assert!(msg.contains("endTime"));
}

#[test]
fn test_missing_fields_rejected() {
    for field in ["name", "date", "startTime", "endTime", "location"] {
        let mut p = payload("2024-09-15", "10:00:00", "12:00:00");
        match field {
            "name" => p.name = None,
            "date" => p.date = None,
            "startTime" => p.start_time = None,
            "endTime" => p.end_time = None,
            _ => p.location = Some("   ".into()),
        }
        let msg = expect_validation(parse_event_payload(&p));
        assert_eq!(msg, format!("{} is required", field));
    }
}

#[test]
fn test_malformed_date_and_time_rejected() {
    let msg = expect_validation(parse_event_payload(&payload(
        "15/09/2024",
        "10:00:00",
        "12:00:00",
    )));
    assert!(msg.starts_with("date"));

    let msg = expect_validation(parse_event_payload(&payload("2024-09-15", "25:00", "12:00")));
    assert!(msg.starts_with("startTime"));

    // February 30th does not exist
    assert!(parse_event_payload(&payload("2024-02-30", "10:00", "11:00")).is_err());
}

#[test]
fn test_blank_description_is_absent() {
    let mut p = payload("2024-09-15", "10:00:00", "12:00:00");
    p.description = Some("  ".into());
    assert_eq!(parse_event_payload(&p).unwrap().description, None);
}

#[test]
fn test_email_validation() {
    assert!(validate_email("ada@example.com").is_ok());
    assert!(validate_email("ada").is_err());
    assert!(validate_email("@example.com").is_err());
    assert!(validate_email("ada@").is_err());
    assert!(validate_email("ada@@example.com").is_err());
    assert!(validate_email("a da@example.com").is_err());
}

#[test]
fn test_participant_payload() {
    let email = parse_participant_payload(&ParticipantPayload {
        email: Some(" ada@example.com ".into()),
    })
    .unwrap();
    assert_eq!(email, "ada@example.com");

    let err = parse_participant_payload(&ParticipantPayload::default()).unwrap_err();
    assert_eq!(err.to_string(), "email is required");
}
