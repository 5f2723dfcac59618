//! Partner service tests against a mocked repository.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use common::AppError;
use content_service_lib::repository::MockPartnerRepository;
use content_service_lib::service::{PartnerManager, PartnerService};
use domain::{Partner, PartnerDraft};

fn partner(id: i64, name: &str, sector: &str) -> Partner {
    let now = Utc::now();
    Partner {
        id,
        name: name.to_string(),
        logo_url: None,
        website: Some("https://partner.example.org".to_string()),
        sector: sector.to_string(),
        phone: "0123456789".to_string(),
        email: "contact@partner.example.org".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn draft(name: &str) -> PartnerDraft {
    PartnerDraft {
        name: name.to_string(),
        logo_url: None,
        website: None,
        sector: "Santé".to_string(),
        phone: "0123456789".to_string(),
        email: "contact@partner.example.org".to_string(),
    }
}

fn service(repo: MockPartnerRepository) -> PartnerManager {
    PartnerManager::new(Arc::new(repo))
}

#[tokio::test]
async fn test_list_filters_by_trimmed_sector() {
    let mut repo = MockPartnerRepository::new();
    repo.expect_list()
        .with(eq(Some("Santé".to_string())))
        .times(1)
        .returning(|_| Ok(vec![partner(2, "Clinique du Cap", "Santé")]));

    let partners = service(repo)
        .list(Some("  Santé ".to_string()))
        .await
        .unwrap();
    assert_eq!(partners.len(), 1);
    assert_eq!(partners[0].sector, "Santé");
}

#[tokio::test]
async fn test_blank_sector_lists_everyone() {
    let mut repo = MockPartnerRepository::new();
    repo.expect_list().with(eq(None)).times(2).returning(|_| {
        Ok(vec![
            partner(3, "Banque Atlantique", "Finance"),
            partner(1, "Ecole Nouvelle", "Education"),
        ])
    });

    let svc = service(repo);
    let partners = svc.list(Some("   ".to_string())).await.unwrap();
    assert_eq!(
        partners.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Banque Atlantique", "Ecole Nouvelle"]
    );
    assert_eq!(svc.list(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_partner() {
    let mut repo = MockPartnerRepository::new();
    repo.expect_create()
        .withf(|d| d.name == "Clinique du Cap")
        .returning(|d| Ok(partner(9, &d.name, &d.sector)));

    let created = service(repo).create(draft("Clinique du Cap")).await.unwrap();
    assert_eq!(created.id, 9);
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let mut repo = MockPartnerRepository::new();
    repo.expect_find_by_id()
        .with(eq(4))
        .returning(|id| Ok(Some(partner(id, "Old name", "Santé"))));
    repo.expect_update()
        .withf(|id, d| *id == 4 && d.name == "New name")
        .times(1)
        .returning(|id, d| Ok(partner(id, &d.name, &d.sector)));

    let updated = service(repo).update(4, draft("New name")).await.unwrap();
    assert_eq!(updated.name, "New name");
}

#[tokio::test]
async fn test_update_missing_partner() {
    let mut repo = MockPartnerRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_update().never();

    let err = service(repo).update(4, draft("New name")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_delete_partner() {
    let mut repo = MockPartnerRepository::new();
    repo.expect_delete().with(eq(4)).returning(|_| Ok(true));

    service(repo).delete(4).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_partner() {
    let mut repo = MockPartnerRepository::new();
    repo.expect_delete().returning(|_| Ok(false));

    let err = service(repo).delete(4).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_get_missing_partner() {
    let mut repo = MockPartnerRepository::new();
    repo.expect_find_by_id().with(eq(5)).returning(|_| Ok(None));

    let err = service(repo).get(5).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
