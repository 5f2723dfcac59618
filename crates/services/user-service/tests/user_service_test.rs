//! User service tests against a mocked profile repository.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use common::{AppError, CurrentUser, PageRequest};
use domain::{ProfileChanges, UserProfile};
use user_service_lib::config::UploadConfig;
use user_service_lib::repository::{MockProfileRepository, ProfileFilter};
use user_service_lib::service::{UserManager, UserService};

fn profile(id: i64, email: &str) -> UserProfile {
    UserProfile {
        id,
        email: email.to_string(),
        first_name: "Awa".to_string(),
        last_name: "Diallo".to_string(),
        phone: None,
        matricule: Some("EMP12345".to_string()),
        service_code: Some("FIN".to_string()),
        address: None,
        birth_date: None,
        family_status: None,
        children_count: None,
        avatar_url: None,
        notif_email: true,
        notif_news: true,
        notif_events: true,
        roles: vec!["USER".to_string()],
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

fn caller(email: &str) -> CurrentUser {
    CurrentUser {
        id: 1,
        email: email.to_string(),
        name: "Awa Diallo".to_string(),
        matricule: Some("EMP12345".to_string()),
        roles: vec!["USER".to_string(), "ADMIN".to_string()],
    }
}

fn upload_config() -> UploadConfig {
    let dir: PathBuf = std::env::temp_dir().join(format!("user-service-test-{}", std::process::id()));
    UploadConfig {
        dir,
        max_avatar_bytes: 1024,
    }
}

fn service(repo: MockProfileRepository) -> UserManager {
    UserManager::new(Arc::new(repo), upload_config())
}

#[tokio::test]
async fn test_get_me_creates_blank_profile_on_first_access() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_email()
        .with(eq("awa@foundation.com"))
        .returning(|_| Ok(None));
    repo.expect_create()
        .withf(|new| {
            new.email == "awa@foundation.com"
                && new.first_name == "Awa"
                && new.last_name == "Diallo"
                && new.roles == vec!["USER".to_string(), "ADMIN".to_string()]
        })
        .times(1)
        .returning(|new| Ok(profile(10, &new.email)));

    let me = service(repo).get_me(&caller("awa@foundation.com")).await.unwrap();
    assert_eq!(me.id, 10);
    assert!(me.notif_email);
}

#[tokio::test]
async fn test_get_me_returns_existing_profile() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(profile(4, email))));
    repo.expect_create().never();

    let me = service(repo).get_me(&caller("awa@foundation.com")).await.unwrap();
    assert_eq!(me.id, 4);
}

#[tokio::test]
async fn test_get_me_rejects_deactivated_profile() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_email().returning(|email| {
        let mut deleted = profile(4, email);
        deleted.deleted_at = Some(Utc::now());
        Ok(Some(deleted))
    });

    let err = service(repo).get_me(&caller("awa@foundation.com")).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_update_me_applies_changes() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(profile(4, email))));
    repo.expect_update()
        .withf(|p| p.phone.as_deref() == Some("0612345678") && !p.notif_news)
        .returning(Ok);

    let changes = ProfileChanges {
        phone: Some("0612345678".to_string()),
        notif_news: Some(false),
        ..Default::default()
    };
    let updated = service(repo)
        .update_me(&caller("awa@foundation.com"), changes)
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Awa");
    assert!(updated.notif_email);
}

#[tokio::test]
async fn test_update_rejects_taken_matricule() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(profile(id, "awa@foundation.com"))));
    repo.expect_matricule_taken()
        .with(eq("EMP99999"), eq(4))
        .returning(|_, _| Ok(true));
    repo.expect_update().never();

    let changes = ProfileChanges {
        matricule: Some("EMP99999".to_string()),
        ..Default::default()
    };
    let err = service(repo).update_user(4, changes).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_unchanged_matricule_skips_uniqueness_check() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(profile(id, "awa@foundation.com"))));
    repo.expect_matricule_taken().never();
    repo.expect_update().returning(Ok);

    let changes = ProfileChanges {
        matricule: Some("EMP12345".to_string()),
        ..Default::default()
    };
    assert!(service(repo).update_user(4, changes).await.is_ok());
}

#[tokio::test]
async fn test_list_users_builds_page() {
    let mut repo = MockProfileRepository::new();
    repo.expect_search()
        .withf(|filter, page| filter.search.as_deref() == Some("dia") && page.page == 2)
        .returning(|_, _| Ok((vec![profile(1, "a@f.com"), profile(2, "b@f.com")], 22)));

    let filter = ProfileFilter {
        search: Some("dia".to_string()),
        service: None,
    };
    let page = service(repo)
        .list_users(filter, PageRequest::new(2, 10))
        .await
        .unwrap();

    assert_eq!(page.total_elements, 22);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.number_of_elements, 2);
    assert!(!page.first);
    assert!(!page.last);
}

#[tokio::test]
async fn test_set_roles_normalizes_and_deduplicates() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(profile(id, "awa@foundation.com"))));
    repo.expect_update().returning(Ok);

    let updated = service(repo)
        .set_roles(4, vec!["admin".to_string(), "USER".to_string(), "ADMIN".to_string()])
        .await
        .unwrap();

    assert_eq!(updated.roles, vec!["ADMIN".to_string(), "USER".to_string()]);
}

#[tokio::test]
async fn test_set_roles_rejects_unknown_or_empty() {
    let repo = MockProfileRepository::new();
    let service = service(repo);

    assert!(matches!(
        service.set_roles(4, vec!["MANAGER".to_string()]).await.unwrap_err(),
        AppError::Validation(_)
    ));
    assert!(matches!(
        service.set_roles(4, Vec::new()).await.unwrap_err(),
        AppError::Validation(_)
    ));
}

#[tokio::test]
async fn test_delete_user_soft_deletes() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(profile(id, "someone@foundation.com"))));
    repo.expect_update()
        .withf(|p| p.deleted_at.is_some())
        .times(1)
        .returning(Ok);

    service(repo)
        .delete_user(8, &caller("admin@foundation.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_own_profile_is_rejected() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(profile(id, "admin@foundation.com"))));
    repo.expect_update().never();

    let err = service(repo)
        .delete_user(8, &caller("Admin@Foundation.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_get_deleted_user_is_not_found() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id().returning(|id| {
        let mut deleted = profile(id, "gone@foundation.com");
        deleted.deleted_at = Some(Utc::now());
        Ok(Some(deleted))
    });

    let err = service(repo).get_user(3).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_restore_requires_deleted_profile() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(profile(id, "active@foundation.com"))));
    repo.expect_find_by_id().with(eq(2)).returning(|id| {
        let mut deleted = profile(id, "gone@foundation.com");
        deleted.deleted_at = Some(Utc::now());
        Ok(Some(deleted))
    });
    repo.expect_update()
        .withf(|p| p.id == 2 && p.deleted_at.is_none())
        .returning(Ok);

    let service = service(repo);
    assert!(matches!(
        service.restore_user(1).await.unwrap_err(),
        AppError::Validation(_)
    ));
    assert!(!service.restore_user(2).await.unwrap().is_deleted());
}

#[tokio::test]
async fn test_upload_avatar_stores_file_and_sets_url() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_email()
        .returning(|email| Ok(Some(profile(4, email))));
    repo.expect_update()
        .withf(|p| {
            p.avatar_url
                .as_deref()
                .is_some_and(|url| url.starts_with("/files/avatars/awafoundationcom_") && url.ends_with(".png"))
        })
        .returning(Ok);

    let config = upload_config();
    let service = UserManager::new(Arc::new(repo), config.clone());
    let updated = service
        .upload_avatar(&caller("awa@foundation.com"), "me.png", vec![1, 2, 3])
        .await
        .unwrap();

    let url = updated.avatar_url.unwrap();
    let stored = config
        .avatar_dir()
        .join(url.trim_start_matches("/files/avatars/"));
    assert_eq!(tokio::fs::read(&stored).await.unwrap(), vec![1, 2, 3]);
    let _ = tokio::fs::remove_file(stored).await;
}

#[tokio::test]
async fn test_upload_avatar_rejects_oversized_file() {
    let mut repo = MockProfileRepository::new();
    repo.expect_find_by_email().never();

    let err = service(repo)
        .upload_avatar(&caller("awa@foundation.com"), "me.png", vec![0; 2048])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
