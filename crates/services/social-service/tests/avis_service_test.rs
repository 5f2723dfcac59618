//! Avis service tests against mocked repositories.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use common::{AppError, CurrentUser, PageRequest};
use domain::{
    Avis, AvisDraft, AvisStatus, AvisType, Demande, DemandeStatus, Prestation,
    PrestationCategory, PriorityLevel, ANONYMOUS_USER_NAME,
};
use social_service_lib::repository::{
    AvisListing, MockAvisRepository, MockDemandeRepository, MockPrestationRepository,
};
use social_service_lib::service::{AvisManager, AvisService};

fn prestation(id: i64) -> Prestation {
    let now = Utc::now();
    Prestation {
        id,
        title: "Soutien scolaire".to_string(),
        short_description: None,
        description: None,
        prestation_type: None,
        category: PrestationCategory::Education,
        min_amount: None,
        max_amount: None,
        duration_label: None,
        conditions: None,
        is_active: true,
        requires_documents: false,
        required_documents: None,
        eligibility_criteria: None,
        processing_time_days: None,
        max_requests_per_year: None,
        image_url: None,
        display_order: 1,
        created_at: now,
        updated_at: now,
    }
}

fn demande(id: i64, user_id: i64) -> Demande {
    let now = Utc::now();
    Demande {
        id,
        user_id,
        user_email: "someone@foundation.com".to_string(),
        user_name: "Someone".to_string(),
        employee_id: None,
        prestation_id: 2,
        prestation_title: None,
        status: DemandeStatus::Paid,
        requested_amount: None,
        approved_amount: None,
        justification: "Cours du soir".to_string(),
        rejection_reason: None,
        documents_uploaded: vec![],
        priority_level: PriorityLevel::Normal,
        submitted_at: None,
        processed_at: None,
        processed_by: None,
        processed_by_name: None,
        expected_processing_date: None,
        payment_reference: None,
        payment_date: None,
        admin_comment: None,
        created_at: now,
        updated_at: now,
    }
}

fn avis(id: i64, approved: bool) -> Avis {
    let now = Utc::now();
    Avis {
        id,
        user_id: 7,
        user_name: "Awa Diallo".to_string(),
        user_email: "awa.diallo@foundation.com".to_string(),
        prestation_id: 2,
        demande_id: None,
        rating: 4,
        comment: Some("Très bon accompagnement".to_string()),
        status: if approved {
            AvisStatus::Published
        } else {
            AvisStatus::Pending
        },
        is_approved: approved,
        is_featured: false,
        moderated_at: None,
        approved_by: None,
        approved_at: None,
        admin_response: None,
        response_date: None,
        avis_type: AvisType::General,
        is_anonymous: false,
        created_at: now,
        updated_at: now,
    }
}

fn draft(demande_id: Option<i64>, anonymous: bool) -> AvisDraft {
    AvisDraft {
        prestation_id: 2,
        demande_id,
        rating: 5,
        comment: Some("Merci".to_string()),
        avis_type: AvisType::ServiceQuality,
        is_anonymous: anonymous,
    }
}

fn member() -> CurrentUser {
    CurrentUser {
        id: 7,
        email: "awa.diallo@foundation.com".to_string(),
        name: "Awa Diallo".to_string(),
        matricule: None,
        roles: vec!["USER".to_string()],
    }
}

fn admin() -> CurrentUser {
    CurrentUser {
        id: 1,
        email: "admin@foundation.com".to_string(),
        name: "Site Admin".to_string(),
        matricule: None,
        roles: vec!["ADMIN".to_string()],
    }
}

fn catalog() -> MockPrestationRepository {
    let mut prestations = MockPrestationRepository::new();
    prestations
        .expect_find_by_id()
        .returning(|id| Ok(Some(prestation(id))));
    prestations
}

fn service(
    repo: MockAvisRepository,
    prestations: MockPrestationRepository,
    demandes: MockDemandeRepository,
) -> AvisManager {
    AvisManager::new(Arc::new(repo), Arc::new(prestations), Arc::new(demandes))
}

#[tokio::test]
async fn test_create_anonymous_avis_hides_author() {
    let mut repo = MockAvisRepository::new();
    repo.expect_exists_for_prestation()
        .with(eq(7), eq(2))
        .returning(|_, _| Ok(false));
    repo.expect_create()
        .withf(|a| {
            a.user_name == ANONYMOUS_USER_NAME
                && a.user_email == "awa.diallo@foundation.com"
                && a.status == AvisStatus::Pending
                && !a.is_approved
        })
        .returning(|mut a| {
            a.id = 12;
            Ok(a)
        });

    let created = service(repo, catalog(), MockDemandeRepository::new())
        .create(&member(), draft(None, true))
        .await
        .unwrap();
    assert_eq!(created.id, 12);
    assert!(created.is_anonymous);
}

#[tokio::test]
async fn test_create_rejects_out_of_range_rating() {
    let mut repo = MockAvisRepository::new();
    repo.expect_create().never();

    let mut invalid = draft(None, false);
    invalid.rating = 6;
    let err = service(repo, MockPrestationRepository::new(), MockDemandeRepository::new())
        .create(&member(), invalid)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_create_for_unknown_prestation() {
    let mut prestations = MockPrestationRepository::new();
    prestations.expect_find_by_id().returning(|_| Ok(None));

    let err = service(MockAvisRepository::new(), prestations, MockDemandeRepository::new())
        .create(&member(), draft(None, false))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(msg) if msg == "Prestation not found"));
}

#[tokio::test]
async fn test_second_avis_for_prestation_is_conflict() {
    let mut repo = MockAvisRepository::new();
    repo.expect_exists_for_prestation().returning(|_, _| Ok(true));
    repo.expect_create().never();

    let err = service(repo, catalog(), MockDemandeRepository::new())
        .create(&member(), draft(None, false))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_avis_on_foreign_demande_is_forbidden() {
    let mut repo = MockAvisRepository::new();
    repo.expect_exists_for_prestation().returning(|_, _| Ok(false));
    repo.expect_exists_for_demande()
        .with(eq(7), eq(30))
        .returning(|_, _| Ok(false));
    repo.expect_create().never();
    let mut demandes = MockDemandeRepository::new();
    demandes
        .expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 99))));

    let err = service(repo, catalog(), demandes)
        .create(&member(), draft(Some(30), false))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_second_avis_for_demande_is_conflict() {
    let mut repo = MockAvisRepository::new();
    repo.expect_exists_for_prestation().returning(|_, _| Ok(false));
    repo.expect_exists_for_demande()
        .with(eq(7), eq(30))
        .returning(|_, _| Ok(true));
    repo.expect_create().never();
    let mut demandes = MockDemandeRepository::new();
    demandes.expect_find_by_id().never();

    let err = service(repo, catalog(), demandes)
        .create(&member(), draft(Some(30), false))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Conflict(msg) if msg == "You have already submitted an avis for this demande"
    ));
}

#[tokio::test]
async fn test_avis_on_own_demande_keeps_reference() {
    let mut repo = MockAvisRepository::new();
    repo.expect_exists_for_prestation().returning(|_, _| Ok(false));
    repo.expect_exists_for_demande().returning(|_, _| Ok(false));
    repo.expect_create()
        .withf(|a| a.demande_id == Some(30) && a.user_name == "Awa Diallo")
        .returning(Ok);
    let mut demandes = MockDemandeRepository::new();
    demandes
        .expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 7))));

    service(repo, catalog(), demandes)
        .create(&member(), draft(Some(30), false))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_approve_records_moderator() {
    let mut repo = MockAvisRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(avis(id, false))));
    repo.expect_update().returning(Ok);

    let approved = service(repo, MockPrestationRepository::new(), MockDemandeRepository::new())
        .approve(4, &admin())
        .await
        .unwrap();
    assert_eq!(approved.status, AvisStatus::Published);
    assert!(approved.is_approved);
    assert_eq!(approved.approved_by.as_deref(), Some("Site Admin"));
}

#[tokio::test]
async fn test_reject_ignores_blank_response() {
    let mut repo = MockAvisRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(avis(id, true))));
    repo.expect_update().returning(Ok);

    let rejected = service(repo, MockPrestationRepository::new(), MockDemandeRepository::new())
        .reject(4, Some("  ".to_string()))
        .await
        .unwrap();
    assert_eq!(rejected.status, AvisStatus::Rejected);
    assert!(!rejected.is_approved);
    assert!(rejected.admin_response.is_none());
}

#[tokio::test]
async fn test_feature_requires_approval() {
    let mut repo = MockAvisRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(avis(id, false))));
    repo.expect_update().never();

    let err = service(repo, MockPrestationRepository::new(), MockDemandeRepository::new())
        .toggle_featured(4)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_respond_sets_response_date() {
    let mut repo = MockAvisRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(avis(id, true))));
    repo.expect_update().returning(Ok);

    let answered = service(repo, MockPrestationRepository::new(), MockDemandeRepository::new())
        .respond(4, "Merci pour votre retour".to_string())
        .await
        .unwrap();
    assert!(answered.response_date.is_some());
}

#[tokio::test]
async fn test_average_rating_without_avis_is_zero() {
    let mut repo = MockAvisRepository::new();
    repo.expect_average_rating()
        .with(eq(Some(2)))
        .returning(|_| Ok(None));

    let average = service(repo, MockPrestationRepository::new(), MockDemandeRepository::new())
        .average_rating(Some(2))
        .await
        .unwrap();
    assert_eq!(average, 0.0);
}

#[tokio::test]
async fn test_by_rating_validates_range() {
    let mut repo = MockAvisRepository::new();
    repo.expect_list().never();

    let err = service(repo, MockPrestationRepository::new(), MockDemandeRepository::new())
        .by_rating(0, PageRequest::new(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_negative_listing() {
    let mut repo = MockAvisRepository::new();
    repo.expect_list()
        .withf(|listing, _| *listing == AvisListing::Negative)
        .returning(|_, _| Ok((vec![], 0)));

    let page = service(repo, MockPrestationRepository::new(), MockDemandeRepository::new())
        .negative(PageRequest::new(1, 10))
        .await
        .unwrap();
    assert!(page.empty);
}
