//! Contact and site service tests against mocked repositories.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;

use common::{AppError, CurrentUser, PageRequest};
use content_service_lib::repository::{ContactFilter, MockContactRepository, MockSiteInfoRepository};
use content_service_lib::service::{
    ContactManager, ContactService, SiteManager, SiteService, SiteUpdate,
};
use domain::{
    ContactMessage, ContactStatus, NewContactMessage, SiteInfo, SiteStats, DEFAULT_MINISTRY_CONTENT,
    DEFAULT_MISSION,
};

fn message(id: i64) -> ContactMessage {
    let now = Utc::now();
    ContactMessage {
        id,
        full_name: "Jean Martin".to_string(),
        email: "jean@example.com".to_string(),
        phone: None,
        subject: "Volunteering".to_string(),
        message: "How can I help?".to_string(),
        status: ContactStatus::New,
        handled: false,
        response_message: None,
        responded_at: None,
        responded_by: None,
        created_at: now,
        updated_at: now,
    }
}

fn admin() -> CurrentUser {
    CurrentUser {
        id: 7,
        email: "admin@foundation.com".to_string(),
        name: "Site Admin".to_string(),
        matricule: None,
        roles: vec!["ADMIN".to_string()],
    }
}

#[tokio::test]
async fn test_submit_stores_message() {
    let mut repo = MockContactRepository::new();
    repo.expect_create()
        .withf(|m| m.email == "jean@example.com")
        .times(1)
        .returning(|_| Ok(message(1)));

    let stored = ContactManager::new(Arc::new(repo))
        .submit(NewContactMessage {
            full_name: "Jean Martin".to_string(),
            email: "jean@example.com".to_string(),
            phone: None,
            subject: "Volunteering".to_string(),
            message: "How can I help?".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(stored.status, ContactStatus::New);
}

#[tokio::test]
async fn test_respond_records_reply() {
    let mut repo = MockContactRepository::new();
    repo.expect_find_by_id()
        .with(eq(3))
        .returning(|id| Ok(Some(message(id))));
    repo.expect_update()
        .withf(|m| {
            m.status == ContactStatus::Responded
                && m.handled
                && m.response_message.as_deref() == Some("Welcome aboard")
                && m.responded_by.as_deref() == Some("Site Admin")
                && m.responded_at.is_some()
        })
        .returning(Ok);

    let answered = ContactManager::new(Arc::new(repo))
        .respond(3, "Welcome aboard".to_string(), &admin())
        .await
        .unwrap();
    assert!(answered.handled);
}

#[tokio::test]
async fn test_closing_marks_handled() {
    let mut repo = MockContactRepository::new();
    repo.expect_find_by_id().returning(|id| Ok(Some(message(id))));
    repo.expect_update()
        .withf(|m| m.status == ContactStatus::Closed && m.handled)
        .returning(Ok);

    assert!(ContactManager::new(Arc::new(repo))
        .set_status(3, ContactStatus::Closed)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_in_progress_stays_unhandled() {
    let mut repo = MockContactRepository::new();
    repo.expect_find_by_id().returning(|id| Ok(Some(message(id))));
    repo.expect_update().returning(Ok);

    let m = ContactManager::new(Arc::new(repo))
        .set_status(3, ContactStatus::InProgress)
        .await
        .unwrap();
    assert!(!m.handled);
}

#[tokio::test]
async fn test_filter_rejects_inverted_range() {
    let mut repo = MockContactRepository::new();
    repo.expect_search().never();

    let now = Utc::now();
    let filter = ContactFilter {
        start: Some(now),
        end: Some(now - Duration::days(1)),
        ..Default::default()
    };
    let err = ContactManager::new(Arc::new(repo))
        .search(filter, PageRequest::new(1, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_unhandled_listing() {
    let mut repo = MockContactRepository::new();
    repo.expect_search()
        .withf(|filter, _| filter.handled == Some(false) && filter.keyword.is_none())
        .returning(|_, _| Ok((vec![message(1), message(2)], 2)));

    let page = ContactManager::new(Arc::new(repo))
        .search(
            ContactFilter {
                handled: Some(false),
                ..Default::default()
            },
            PageRequest::new(1, 20),
        )
        .await
        .unwrap();
    assert_eq!(page.number_of_elements, 2);
}

#[tokio::test]
async fn test_home_seeds_default_row() {
    let mut repo = MockSiteInfoRepository::new();
    repo.expect_first().returning(|| Ok(None));
    repo.expect_create()
        .withf(|info| {
            info.mission == DEFAULT_MISSION
                && info.ministry_content == DEFAULT_MINISTRY_CONTENT
                && info.stats == SiteStats::default()
        })
        .times(1)
        .returning(|mut info| {
            info.id = 1;
            Ok(info)
        });

    let home = SiteManager::new(Arc::new(repo)).home().await.unwrap();
    assert_eq!(home.mission, DEFAULT_MISSION);
    assert_eq!(home.stats.total_users, 0);
}

#[tokio::test]
async fn test_site_update_keeps_absent_fields() {
    let mut repo = MockSiteInfoRepository::new();
    repo.expect_first().returning(|| {
        Ok(Some(SiteInfo {
            id: 1,
            mission: "Old mission".to_string(),
            stats: SiteStats::default(),
            ministry_content: "Ministry".to_string(),
            updated_at: Utc::now(),
        }))
    });
    repo.expect_create().never();
    repo.expect_update()
        .withf(|info| info.mission == "Old mission" && info.stats.total_events == 12)
        .returning(Ok);

    let update = SiteUpdate {
        stats: Some(SiteStats {
            total_users: 40,
            total_events: 12,
            total_partners: 5,
        }),
        ..Default::default()
    };
    let info = SiteManager::new(Arc::new(repo)).update(update).await.unwrap();
    assert_eq!(info.stats.total_partners, 5);
}
