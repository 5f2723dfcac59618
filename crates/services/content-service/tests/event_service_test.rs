//! Event service tests against a mocked repository.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;

use common::{AppError, CurrentUser, PageRequest};
use content_service_lib::repository::{EventListing, MockEventRepository};
use content_service_lib::service::{EventManager, EventService, NEXT_EVENTS_LIMIT};
use domain::{ContentStatus, Event, EventChanges, EventDraft, EventType};

fn event(id: i64, status: ContentStatus) -> Event {
    let now = Utc::now();
    Event {
        id,
        title: "Charity run".to_string(),
        description: Some("5km around the park".to_string()),
        start_date: now + Duration::days(30),
        end_date: None,
        location: Some("Central park".to_string()),
        image_url: None,
        event_type: EventType::Fundraiser,
        status,
        published: status == ContentStatus::Published,
        max_participants: Some(2),
        current_participants: 0,
        registration_required: true,
        registration_deadline: Some(now + Duration::days(20)),
        organizer_id: Some(7),
        organizer_name: Some("Site Admin".to_string()),
        published_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn organizer() -> CurrentUser {
    CurrentUser {
        id: 7,
        email: "admin@foundation.com".to_string(),
        name: "Site Admin".to_string(),
        matricule: None,
        roles: vec!["ADMIN".to_string()],
    }
}

fn service(repo: MockEventRepository) -> EventManager {
    EventManager::new(Arc::new(repo))
}

#[tokio::test]
async fn test_create_sets_organizer_and_draft_status() {
    let mut repo = MockEventRepository::new();
    repo.expect_create()
        .withf(|e| {
            e.organizer_id == Some(7)
                && e.status == ContentStatus::Draft
                && e.current_participants == 0
        })
        .returning(|mut e| {
            e.id = 1;
            Ok(e)
        });

    let start = Utc::now() + Duration::days(3);
    let draft = EventDraft {
        title: "Workshop".to_string(),
        description: None,
        start_date: start,
        end_date: Some(start + Duration::hours(2)),
        location: None,
        image_url: None,
        event_type: EventType::Workshop,
        max_participants: None,
        registration_required: false,
        registration_deadline: None,
    };

    let created = service(repo).create(draft, &organizer()).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.organizer_name.as_deref(), Some("Site Admin"));
}

#[tokio::test]
async fn test_create_rejects_end_before_start() {
    let mut repo = MockEventRepository::new();
    repo.expect_create().never();

    let start = Utc::now() + Duration::days(3);
    let draft = EventDraft {
        title: "Workshop".to_string(),
        description: None,
        start_date: start,
        end_date: Some(start - Duration::hours(1)),
        location: None,
        image_url: None,
        event_type: EventType::Workshop,
        max_participants: None,
        registration_required: false,
        registration_deadline: None,
    };

    let err = service(repo).create(draft, &organizer()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let mut repo = MockEventRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(event(id, ContentStatus::Draft))));
    repo.expect_update()
        .withf(|e| e.location.as_deref() == Some("Town hall") && e.title == "Charity run")
        .returning(Ok);

    let changes = EventChanges {
        location: Some("Town hall".to_string()),
        ..Default::default()
    };
    assert!(service(repo).update(4, changes).await.is_ok());
}

#[tokio::test]
async fn test_register_increments_participants() {
    let mut repo = MockEventRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(event(id, ContentStatus::Published))));
    repo.expect_update()
        .withf(|e| e.current_participants == 1)
        .returning(Ok);

    let event = service(repo).register(4).await.unwrap();
    assert_eq!(event.current_participants, 1);
}

#[tokio::test]
async fn test_register_full_event_is_rejected() {
    let mut repo = MockEventRepository::new();
    repo.expect_find_by_id().returning(|id| {
        let mut e = event(id, ContentStatus::Published);
        e.current_participants = 2;
        Ok(Some(e))
    });
    repo.expect_update().never();

    let err = service(repo).register(4).await.unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "Event is full"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_register_after_deadline_is_rejected() {
    let mut repo = MockEventRepository::new();
    repo.expect_find_by_id().returning(|id| {
        let mut e = event(id, ContentStatus::Published);
        e.registration_deadline = Some(Utc::now() - Duration::hours(1));
        Ok(Some(e))
    });

    let err = service(repo).register(4).await.unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "Registration deadline has passed"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unregister_never_goes_negative() {
    let mut repo = MockEventRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(event(id, ContentStatus::Published))));
    repo.expect_update()
        .withf(|e| e.current_participants == 0)
        .returning(Ok);

    assert_eq!(
        service(repo).unregister(4).await.unwrap().current_participants,
        0
    );
}

#[tokio::test]
async fn test_public_get_hides_drafts() {
    let mut repo = MockEventRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(event(id, ContentStatus::Draft))));

    let err = service(repo).get_published(4).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_upcoming_uses_given_lower_bound() {
    let from = Utc::now() + Duration::days(7);
    let mut repo = MockEventRepository::new();
    repo.expect_list()
        .withf(move |listing, _| *listing == EventListing::Upcoming { from })
        .returning(|_, _| Ok((vec![], 0)));

    let page = service(repo)
        .upcoming(Some(from), PageRequest::new(1, 10))
        .await
        .unwrap();
    assert!(page.empty);
}

#[tokio::test]
async fn test_search_requires_keyword() {
    let mut repo = MockEventRepository::new();
    repo.expect_list().never();

    let err = service(repo)
        .search("   ".to_string(), PageRequest::new(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_next_returns_five() {
    let mut repo = MockEventRepository::new();
    repo.expect_next()
        .withf(|_, limit| *limit == NEXT_EVENTS_LIMIT)
        .returning(|_, _| Ok(vec![event(1, ContentStatus::Published)]));

    assert_eq!(service(repo).next().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_existing_event() {
    let mut repo = MockEventRepository::new();
    repo.expect_delete().with(eq(4)).returning(|_| Ok(true));

    assert!(service(repo).delete(4).await.is_ok());
}
