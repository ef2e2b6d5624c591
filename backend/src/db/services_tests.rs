use super::*;
use crate::db::repositories::LocalRepository;
use crate::db::repository::EventRepository;
use crate::models::{EventDraft, TimeWindow};
use chrono::{NaiveDate, NaiveTime};

async fn seed_event(repo: &LocalRepository, start_hour: u32) -> Event {
    let draft = EventDraft::new(
        format!("Event at {}", start_hour),
        TimeWindow::new(
            "Hall A",
            NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
            NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(start_hour, 30, 0).unwrap(),
        ),
        None,
    );
    repo.insert_event(&draft).await.unwrap()
}

#[tokio::test]
async fn test_health_check_reports_false_when_unhealthy() {
    let repo = LocalRepository::new();
    assert!(health_check(&repo).await);

    repo.set_healthy(false);
    assert!(!health_check(&repo).await);
}

#[tokio::test]
async fn test_list_events_pages_in_id_order() {
    let repo = LocalRepository::new();
    for hour in 8..13 {
        seed_event(&repo, hour).await;
    }

    let page = list_events(&repo, PageRequest::new(Some(2), Some(1)))
        .await
        .unwrap();

    assert_eq!(page.count, 5);
    let ids: Vec<i64> = page.rows.iter().map(|e| e.id.value()).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn test_get_missing_event_is_not_found() {
    let repo = LocalRepository::new();
    let err = get_event(&repo, EventId::new(9)).await.unwrap_err();
    assert_eq!(err.to_string(), "Event not found");
}

#[tokio::test]
async fn test_delete_event_cascades_to_participants() {
    let repo = LocalRepository::new();
    let doomed = seed_event(&repo, 9).await;
    let kept = seed_event(&repo, 11).await;
    add_participant(&repo, doomed.id, "a@example.com")
        .await
        .unwrap();
    add_participant(&repo, kept.id, "b@example.com")
        .await
        .unwrap();

    delete_event(&repo, doomed.id).await.unwrap();

    assert_eq!(repo.event_count(), 1);
    assert_eq!(repo.participant_count(), 1);
    assert!(delete_event(&repo, doomed.id).await.is_err());
}

#[tokio::test]
async fn test_add_participant_requires_event() {
    let repo = LocalRepository::new();
    let err = add_participant(&repo, EventId::new(1), "a@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::NotFound { .. }));
    assert_eq!(err.to_string(), "Event not found");
}

#[tokio::test]
async fn test_duplicate_email_is_validation_error() {
    let repo = LocalRepository::new();
    let first = seed_event(&repo, 9).await;
    let second = seed_event(&repo, 11).await;
    add_participant(&repo, first.id, "a@example.com")
        .await
        .unwrap();

    let err = add_participant(&repo, second.id, "a@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::Validation(_)));
    assert_eq!(repo.participant_count(), 1);
}

#[tokio::test]
async fn test_remove_participant_leaves_siblings() {
    let repo = LocalRepository::new();
    let event = seed_event(&repo, 9).await;
    let p1 = add_participant(&repo, event.id, "a@example.com")
        .await
        .unwrap();
    let p2 = add_participant(&repo, event.id, "b@example.com")
        .await
        .unwrap();

    remove_participant(&repo, p1.id).await.unwrap();

    let remaining = list_participants(&repo, event.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, p2.id);
    assert!(get_event(&repo, event.id).await.is_ok());

    let err = remove_participant(&repo, p1.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Participant not found");
}
