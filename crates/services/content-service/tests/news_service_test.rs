//! News service tests against a mocked repository.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use common::{AppError, CurrentUser, PageRequest};
use content_service_lib::repository::{MockNewsRepository, NewsListing};
use content_service_lib::service::{NewsManager, NewsService, POPULAR_NEWS_LIMIT};
use domain::{ContentStatus, News, NewsDraft};

fn news(id: i64, slug: &str, status: ContentStatus) -> News {
    let now = Utc::now();
    News {
        id,
        title: "Scholarships open".to_string(),
        slug: slug.to_string(),
        body: "Applications are open until June.".to_string(),
        image_url: None,
        category: "Education".to_string(),
        tags: vec!["scholarship".to_string()],
        author_id: Some(1),
        author_name: Some("Admin".to_string()),
        status,
        published: status == ContentStatus::Published,
        featured: false,
        view_count: 3,
        published_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn draft(title: &str, slug: Option<&str>) -> NewsDraft {
    NewsDraft {
        title: title.to_string(),
        slug: slug.map(str::to_string),
        body: "Body".to_string(),
        image_url: None,
        category: "Education".to_string(),
        tags: vec![],
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

fn service(repo: MockNewsRepository) -> NewsManager {
    NewsManager::new(Arc::new(repo))
}

#[tokio::test]
async fn test_create_derives_slug_and_publishes() {
    let mut repo = MockNewsRepository::new();
    repo.expect_slug_taken()
        .with(eq("scholarships-open-2024"), eq(None))
        .returning(|_, _| Ok(false));
    repo.expect_create()
        .withf(|n| {
            n.slug == "scholarships-open-2024"
                && n.status == ContentStatus::Published
                && n.published_at.is_some()
                && n.author_id == Some(7)
                && n.author_name.as_deref() == Some("Site Admin")
        })
        .times(1)
        .returning(|mut n| {
            n.id = 11;
            Ok(n)
        });

    let created = service(repo)
        .create(draft("Scholarships open 2024!", None), true, &admin())
        .await
        .unwrap();

    assert_eq!(created.id, 11);
    assert!(created.published);
}

#[tokio::test]
async fn test_create_as_draft_by_default() {
    let mut repo = MockNewsRepository::new();
    repo.expect_slug_taken().returning(|_, _| Ok(false));
    repo.expect_create()
        .withf(|n| n.status == ContentStatus::Draft && n.published_at.is_none())
        .returning(Ok);

    let created = service(repo)
        .create(draft("Draft piece", None), false, &admin())
        .await
        .unwrap();
    assert!(!created.published);
}

#[tokio::test]
async fn test_create_rejects_taken_slug() {
    let mut repo = MockNewsRepository::new();
    repo.expect_slug_taken()
        .with(eq("custom"), eq(None))
        .returning(|_, _| Ok(true));
    repo.expect_create().never();

    let err = service(repo)
        .create(draft("Anything", Some("Custom")), false, &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_checks_slug_against_other_rows() {
    let mut repo = MockNewsRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(news(id, "old-slug", ContentStatus::Draft))));
    repo.expect_slug_taken()
        .with(eq("new-title"), eq(Some(5)))
        .returning(|_, _| Ok(false));
    repo.expect_update()
        .withf(|n| n.title == "New title" && n.slug == "new-title")
        .returning(Ok);

    let updated = service(repo)
        .update(5, draft("New title", None))
        .await
        .unwrap();
    assert_eq!(updated.slug, "new-title");
}

#[tokio::test]
async fn test_update_keeping_slug_skips_check() {
    let mut repo = MockNewsRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(news(id, "same", ContentStatus::Draft))));
    repo.expect_slug_taken().never();
    repo.expect_update().returning(Ok);

    assert!(service(repo)
        .update(5, draft("Changed title", Some("same")))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_read_by_slug_counts_view() {
    let mut repo = MockNewsRepository::new();
    repo.expect_find_by_slug()
        .with(eq("hello"))
        .returning(|slug| Ok(Some(news(3, slug, ContentStatus::Published))));
    repo.expect_increment_views()
        .with(eq(3))
        .times(1)
        .returning(|_| Ok(()));

    let article = service(repo).read_by_slug("hello").await.unwrap();
    assert_eq!(article.view_count, 4);
}

#[tokio::test]
async fn test_read_by_slug_hides_drafts() {
    let mut repo = MockNewsRepository::new();
    repo.expect_find_by_slug()
        .returning(|slug| Ok(Some(news(3, slug, ContentStatus::Draft))));
    repo.expect_increment_views().never();

    let err = service(repo).read_by_slug("hello").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_unpublish_clears_publication() {
    let mut repo = MockNewsRepository::new();
    repo.expect_find_by_id().returning(|id| {
        let mut n = news(id, "s", ContentStatus::Published);
        n.published_at = Some(Utc::now());
        Ok(Some(n))
    });
    repo.expect_update()
        .withf(|n| n.status == ContentStatus::Draft && n.published_at.is_none())
        .returning(Ok);

    let news = service(repo).unpublish(2).await.unwrap();
    assert!(!news.published);
}

#[tokio::test]
async fn test_toggle_featured() {
    let mut repo = MockNewsRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(news(id, "s", ContentStatus::Published))));
    repo.expect_update().returning(Ok);

    assert!(service(repo).toggle_featured(2).await.unwrap().featured);
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let mut repo = MockNewsRepository::new();
    repo.expect_delete().with(eq(9)).returning(|_| Ok(false));

    let err = service(repo).delete(9).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_public_listing_passes_filters() {
    let mut repo = MockNewsRepository::new();
    repo.expect_list()
        .withf(|listing, page| {
            *listing
                == NewsListing::Published {
                    query: Some("bourse".to_string()),
                    category: None,
                }
                && page.size == 10
        })
        .returning(|_, _| Ok((vec![news(1, "a", ContentStatus::Published)], 1)));

    let page = service(repo)
        .list_published(Some("bourse".to_string()), None, PageRequest::new(1, 10))
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
    assert!(page.first && page.last);
}

#[tokio::test]
async fn test_popular_uses_top_five() {
    let mut repo = MockNewsRepository::new();
    repo.expect_most_viewed()
        .with(eq(POPULAR_NEWS_LIMIT))
        .returning(|_| Ok(vec![]));

    assert!(service(repo).popular().await.unwrap().is_empty());
}
