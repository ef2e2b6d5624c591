use super::*;
use crate::db::repositories::LocalRepository;
use crate::db::repository::EventRepository;
use chrono::{NaiveDate, NaiveTime};

fn draft(location: &str, day: u32, start: (u32, u32), end: (u32, u32)) -> EventDraft {
    EventDraft::new(
        "Meetup",
        TimeWindow::new(
            location,
            NaiveDate::from_ymd_opt(2024, 9, day).unwrap(),
            NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        ),
        None,
    )
}

fn controller() -> (AdmissionController, LocalRepository) {
    let repo = LocalRepository::new();
    (AdmissionController::new(Arc::new(repo.clone())), repo)
}

#[tokio::test]
async fn test_create_assigns_identity() {
    let (admission, repo) = controller();

    let first = admission
        .admit_create(&draft("Hall A", 15, (10, 0), (12, 0)))
        .await
        .unwrap();
    let second = admission
        .admit_create(&draft("Hall A", 15, (13, 0), (14, 0)))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.event_count(), 2);
}

#[tokio::test]
async fn test_conflict_leaves_storage_untouched() {
    let (admission, repo) = controller();
    let existing = admission
        .admit_create(&draft("Hall A", 15, (10, 0), (12, 0)))
        .await
        .unwrap();

    let err = admission
        .admit_create(&draft("Hall A", 15, (11, 0), (13, 0)))
        .await
        .unwrap_err();

    match err {
        SchedulingError::Conflict {
            location,
            conflicting,
            ..
        } => {
            assert_eq!(location, "Hall A");
            assert_eq!(conflicting, Some(existing.id));
        }
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(repo.event_count(), 1);
}

#[tokio::test]
async fn test_boundary_touch_conflicts() {
    let (admission, _) = controller();
    admission
        .admit_create(&draft("Hall A", 15, (10, 0), (12, 0)))
        .await
        .unwrap();

    let err = admission
        .admit_create(&draft("Hall A", 15, (12, 0), (13, 0)))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_update_excludes_self() {
    let (admission, _) = controller();
    let event = admission
        .admit_create(&draft("Hall A", 15, (10, 0), (12, 0)))
        .await
        .unwrap();

    let mut same_slot = draft("Hall A", 15, (10, 0), (12, 0));
    same_slot.description = Some("Now with pizza".into());

    let updated = admission.admit_update(event.id, &same_slot).await.unwrap();
    assert_eq!(updated.id, event.id);
    assert_eq!(updated.description.as_deref(), Some("Now with pizza"));
}

#[tokio::test]
async fn test_update_into_other_event_conflicts() {
    let (admission, repo) = controller();
    admission
        .admit_create(&draft("Hall A", 15, (9, 0), (17, 0)))
        .await
        .unwrap();
    let movable = admission
        .admit_create(&draft("Hall B", 15, (10, 0), (11, 0)))
        .await
        .unwrap();

    let err = admission
        .admit_update(movable.id, &draft("Hall A", 15, (10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let unchanged = repo.get_event(movable.id).await.unwrap();
    assert_eq!(unchanged.location, "Hall B");
}

#[tokio::test]
async fn test_update_missing_event_is_not_found() {
    let (admission, _) = controller();

    let err = admission
        .admit_update(EventId::new(42), &draft("Hall A", 15, (10, 0), (12, 0)))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Event not found");
}

#[tokio::test]
async fn test_unhealthy_storage_is_repository_error() {
    let (admission, repo) = controller();
    repo.set_healthy(false);

    let err = admission
        .admit_create(&draft("Hall A", 15, (10, 0), (12, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::Repository(_)));
}
