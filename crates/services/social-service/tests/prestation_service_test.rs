//! Prestation service tests against a mocked repository.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use rust_decimal::Decimal;

use common::AppError;
use domain::{
    Prestation, PrestationCategory, PrestationChanges, PrestationDraft, PrestationType,
    MAX_PROCESSING_TIME_DAYS,
};
use social_service_lib::repository::{MockPrestationRepository, PrestationFilter};
use social_service_lib::service::{PrestationManager, PrestationService, MOST_REQUESTED_LIMIT};

fn prestation(id: i64, active: bool) -> Prestation {
    let now = Utc::now();
    Prestation {
        id,
        title: "Aide au logement".to_string(),
        short_description: Some("Loyer".to_string()),
        description: None,
        prestation_type: Some(PrestationType::AideFinanciere),
        category: PrestationCategory::Logement,
        min_amount: Some(Decimal::from(100)),
        max_amount: Some(Decimal::from(1000)),
        duration_label: None,
        conditions: None,
        is_active: active,
        requires_documents: false,
        required_documents: None,
        eligibility_criteria: None,
        processing_time_days: Some(15),
        max_requests_per_year: Some(2),
        image_url: None,
        display_order: 1,
        created_at: now,
        updated_at: now,
    }
}

fn draft(display_order: Option<i32>) -> PrestationDraft {
    PrestationDraft {
        title: "Bourse scolaire".to_string(),
        short_description: None,
        description: None,
        prestation_type: Some(PrestationType::Bourse),
        category: PrestationCategory::Education,
        min_amount: Some(Decimal::from(50)),
        max_amount: Some(Decimal::from(500)),
        duration_label: None,
        conditions: None,
        is_active: true,
        requires_documents: true,
        required_documents: Some("Certificat de scolarité".to_string()),
        eligibility_criteria: None,
        processing_time_days: Some(10),
        max_requests_per_year: Some(1),
        image_url: None,
        display_order,
    }
}

fn service(repo: MockPrestationRepository) -> PrestationManager {
    PrestationManager::new(Arc::new(repo))
}

#[tokio::test]
async fn test_create_appends_after_last_display_order() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_max_order().returning(|| Ok(Some(4)));
    repo.expect_create()
        .withf(|p| p.display_order == 5 && p.is_active)
        .returning(|mut p| {
            p.id = 9;
            Ok(p)
        });

    let created = service(repo).create(draft(None)).await.unwrap();
    assert_eq!(created.id, 9);
    assert_eq!(created.display_order, 5);
}

#[tokio::test]
async fn test_create_first_prestation_gets_order_one() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_max_order().returning(|| Ok(None));
    repo.expect_create().returning(Ok);

    let created = service(repo).create(draft(None)).await.unwrap();
    assert_eq!(created.display_order, 1);
}

#[tokio::test]
async fn test_create_keeps_explicit_order() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_max_order().never();
    repo.expect_create().returning(Ok);

    let created = service(repo).create(draft(Some(12))).await.unwrap();
    assert_eq!(created.display_order, 12);
}

#[tokio::test]
async fn test_create_rejects_inverted_amount_bounds() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_create().never();

    let mut invalid = draft(None);
    invalid.min_amount = Some(Decimal::from(900));
    invalid.max_amount = Some(Decimal::from(100));

    let err = service(repo).create(invalid).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_rejects_unbounded_processing_time() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_create().never();

    let mut invalid = draft(None);
    invalid.processing_time_days = Some(i32::MAX);

    let err = service(repo).create(invalid).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_rejects_unbounded_processing_time() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(prestation(id, true))));
    repo.expect_update().never();

    let changes = PrestationChanges {
        processing_time_days: Some(MAX_PROCESSING_TIME_DAYS + 1),
        ..Default::default()
    };
    let err = service(repo).update(1, changes).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_applies_changes() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_find_by_id()
        .with(eq(1))
        .returning(|id| Ok(Some(prestation(id, true))));
    repo.expect_update()
        .withf(|p| p.title == "Aide d'urgence" && p.processing_time_days == Some(3))
        .returning(Ok);

    let changes = PrestationChanges {
        title: Some("Aide d'urgence".to_string()),
        processing_time_days: Some(3),
        ..Default::default()
    };
    let updated = service(repo).update(1, changes).await.unwrap();
    assert_eq!(updated.category, PrestationCategory::Logement);
}

#[tokio::test]
async fn test_deactivate_keeps_other_fields() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(prestation(id, true))));
    repo.expect_update().withf(|p| !p.is_active).returning(Ok);

    let updated = service(repo).set_active(3, false).await.unwrap();
    assert!(!updated.is_active);
    assert_eq!(updated.title, "Aide au logement");
}

#[tokio::test]
async fn test_reorder_rejects_duplicate_ids() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_reorder().never();

    let err = service(repo).reorder(vec![3, 1, 3]).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(msg) if msg == "Prestation 3 appears more than once"));
}

#[tokio::test]
async fn test_reorder_passes_ids_through() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_reorder()
        .with(eq(vec![3, 1, 2]))
        .times(1)
        .returning(|_| Ok(()));

    service(repo).reorder(vec![3, 1, 2]).await.unwrap();
}

#[tokio::test]
async fn test_delete_refused_while_demandes_exist() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_demande_count().with(eq(4)).returning(|_| Ok(2));
    repo.expect_delete().never();

    let err = service(repo).delete(4).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_delete_missing_prestation() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_demande_count().returning(|_| Ok(0));
    repo.expect_delete().with(eq(8)).returning(|_| Ok(false));

    let err = service(repo).delete(8).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_inactive_prestation_hidden_from_catalog() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(prestation(id, false))));

    let err = service(repo).get_active(2).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_catalog_listing_forces_active_only() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_list()
        .withf(|f| {
            *f == PrestationFilter {
                active_only: true,
                category: Some(PrestationCategory::Sante),
                search: Some("soins".to_string()),
                ..Default::default()
            }
        })
        .returning(|_| Ok(vec![prestation(1, true)]));

    let items = service(repo)
        .list_active(Some(PrestationCategory::Sante), Some("soins".to_string()))
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_admin_listing_includes_inactive() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_list()
        .withf(|f| !f.active_only)
        .returning(|_| Ok(vec![prestation(1, true), prestation(2, false)]));

    assert_eq!(service(repo).list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_requires_keyword() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_list().never();

    let err = service(repo).search("  ".to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_most_requested_uses_fixed_limit() {
    let mut repo = MockPrestationRepository::new();
    repo.expect_most_requested()
        .with(eq(MOST_REQUESTED_LIMIT))
        .returning(|_| Ok(vec![prestation(2, true), prestation(1, true)]));

    let items = service(repo).most_requested().await.unwrap();
    assert_eq!(items[0].id, 2);
}
