//! Demande service tests against mocked repositories.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use rust_decimal::Decimal;

use common::{AppError, CurrentUser, PageRequest};
use domain::{
    Demande, DemandeDraft, DemandeStatus, Prestation, PrestationCategory, PriorityLevel,
    StatusChange,
};
use social_service_lib::repository::{
    DemandeListing, MockDemandeRepository, MockPrestationRepository,
};
use social_service_lib::service::{
    DemandeManager, DemandeService, DraftUpdate, MAX_DUE_SOON_DAYS, UNKNOWN_PRESTATION_TITLE,
};

fn prestation(id: i64, active: bool) -> Prestation {
    let now = Utc::now();
    Prestation {
        id,
        title: "Aide au logement".to_string(),
        short_description: None,
        description: None,
        prestation_type: None,
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

fn demande(id: i64, user_id: i64, status: DemandeStatus) -> Demande {
    let now = Utc::now();
    Demande {
        id,
        user_id,
        user_email: "awa.diallo@foundation.com".to_string(),
        user_name: "Awa Diallo".to_string(),
        employee_id: Some("EMP12345".to_string()),
        prestation_id: 1,
        prestation_title: Some("Aide au logement".to_string()),
        status,
        requested_amount: Some(Decimal::from(400)),
        approved_amount: None,
        justification: "Loyer impayé".to_string(),
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

fn member() -> CurrentUser {
    CurrentUser {
        id: 7,
        email: "awa.diallo@foundation.com".to_string(),
        name: "Awa Diallo".to_string(),
        matricule: Some("EMP12345".to_string()),
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

fn draft(amount: i64) -> DemandeDraft {
    DemandeDraft {
        prestation_id: 1,
        requested_amount: Some(Decimal::from(amount)),
        justification: "Loyer impayé depuis deux mois".to_string(),
        documents: vec!["bail.pdf".to_string()],
        priority_level: None,
    }
}

fn service(repo: MockDemandeRepository, prestations: MockPrestationRepository) -> DemandeManager {
    DemandeManager::new(Arc::new(repo), Arc::new(prestations))
}

fn catalog(active: bool) -> MockPrestationRepository {
    let mut prestations = MockPrestationRepository::new();
    prestations
        .expect_find_by_id()
        .returning(move |id| Ok(Some(prestation(id, active))));
    prestations
}

#[tokio::test]
async fn test_create_draft_copies_applicant_from_token() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_count_since().returning(|_, _, _| Ok(0));
    repo.expect_create()
        .withf(|d| {
            d.user_id == 7
                && d.employee_id.as_deref() == Some("EMP12345")
                && d.status == DemandeStatus::Draft
                && d.priority_level == PriorityLevel::Normal
                && d.prestation_title.as_deref() == Some("Aide au logement")
        })
        .returning(|mut d| {
            d.id = 21;
            Ok(d)
        });
    repo.expect_update().never();

    let created = service(repo, catalog(true))
        .create(&member(), draft(400), false)
        .await
        .unwrap();
    assert_eq!(created.id, 21);
    assert!(created.submitted_at.is_none());
}

#[tokio::test]
async fn test_create_and_submit_sets_expected_date() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_count_since().returning(|_, _, _| Ok(1));
    repo.expect_create()
        .withf(|d| d.status == DemandeStatus::Submitted && d.submitted_at.is_some())
        .times(1)
        .returning(|mut d| {
            d.id = 22;
            Ok(d)
        });
    repo.expect_update().never();

    let created = service(repo, catalog(true))
        .create(&member(), draft(400), true)
        .await
        .unwrap();

    let submitted = created.submitted_at.unwrap();
    assert_eq!(created.status, DemandeStatus::Submitted);
    assert_eq!(
        created.expected_processing_date,
        Some(submitted + Duration::days(15))
    );
}

#[tokio::test]
async fn test_create_and_submit_without_required_documents_stores_nothing() {
    let mut prestations = MockPrestationRepository::new();
    prestations.expect_find_by_id().returning(|id| {
        let mut p = prestation(id, true);
        p.requires_documents = true;
        Ok(Some(p))
    });
    let mut repo = MockDemandeRepository::new();
    repo.expect_count_since().returning(|_, _, _| Ok(0));
    repo.expect_create().never();
    repo.expect_update().never();

    let mut without_documents = draft(400);
    without_documents.documents.clear();
    let err = service(repo, prestations)
        .create(&member(), without_documents, true)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::BadRequest(msg) if msg == "Required documents must be uploaded before submission"
    ));
}

#[tokio::test]
async fn test_create_for_unknown_prestation() {
    let mut prestations = MockPrestationRepository::new();
    prestations.expect_find_by_id().returning(|_| Ok(None));
    let mut repo = MockDemandeRepository::new();
    repo.expect_create().never();

    let err = service(repo, prestations)
        .create(&member(), draft(400), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(msg) if msg == "Prestation not found"));
}

#[tokio::test]
async fn test_create_for_inactive_prestation() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_create().never();

    let err = service(repo, catalog(false))
        .create(&member(), draft(400), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(msg) if msg == "This prestation is not available"));
}

#[tokio::test]
async fn test_create_over_yearly_quota() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_count_since()
        .withf(|user_id, prestation_id, since| {
            *user_id == 7 && *prestation_id == 1 && *since <= Utc::now()
        })
        .returning(|_, _, _| Ok(2));
    repo.expect_create().never();

    let err = service(repo, catalog(true))
        .create(&member(), draft(400), false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::BadRequest(msg)
            if msg == "Maximum number of requests per year exceeded for this prestation"
    ));
}

#[tokio::test]
async fn test_create_above_maximum_amount() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_count_since().returning(|_, _, _| Ok(0));
    repo.expect_create().never();

    let err = service(repo, catalog(true))
        .create(&member(), draft(5000), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(msg) if msg == "Requested amount exceeds maximum allowed"));
}

#[tokio::test]
async fn test_create_requires_justification() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_create().never();

    let mut blank = draft(400);
    blank.justification = "   ".to_string();
    let err = service(repo, catalog(true))
        .create(&member(), blank, false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_update_draft_of_submitted_demande() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 7, DemandeStatus::Submitted))));
    repo.expect_update().never();

    let err = service(repo, MockPrestationRepository::new())
        .update_draft(3, &member(), DraftUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_update_draft_of_someone_else() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 99, DemandeStatus::Draft))));

    let err = service(repo, MockPrestationRepository::new())
        .update_draft(3, &member(), DraftUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_update_draft_replaces_documents() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 7, DemandeStatus::Draft))));
    repo.expect_update()
        .withf(|d| d.documents_uploaded == vec!["facture.pdf".to_string()])
        .returning(Ok);

    let update = DraftUpdate {
        documents: Some(vec!["facture.pdf".to_string()]),
        ..Default::default()
    };
    let updated = service(repo, MockPrestationRepository::new())
        .update_draft(3, &member(), update)
        .await
        .unwrap();
    assert_eq!(updated.justification, "Loyer impayé");
}

#[tokio::test]
async fn test_submit_with_out_of_range_processing_time() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 7, DemandeStatus::Draft))));
    repo.expect_update().never();
    let mut prestations = MockPrestationRepository::new();
    prestations.expect_find_by_id().returning(|id| {
        let mut p = prestation(id, true);
        p.processing_time_days = Some(i32::MAX);
        Ok(Some(p))
    });

    let err = service(repo, prestations)
        .submit(5, &member())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::BadRequest(msg) if msg == "Prestation processing time is out of range"
    ));
}

#[tokio::test]
async fn test_cancel_paid_demande() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 7, DemandeStatus::Paid))));
    repo.expect_update().never();

    let err = service(repo, MockPrestationRepository::new())
        .cancel(5, &member())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_get_denied_to_other_members() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 99, DemandeStatus::Submitted))));

    let err = service(repo, MockPrestationRepository::new())
        .get(5, &member())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(msg) if msg == "Access denied"));
}

#[tokio::test]
async fn test_admin_get_fills_missing_title() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id().returning(|id| {
        let mut d = demande(id, 99, DemandeStatus::Submitted);
        d.prestation_title = None;
        Ok(Some(d))
    });
    let mut prestations = MockPrestationRepository::new();
    prestations.expect_find_by_id().returning(|_| Ok(None));

    let found = service(repo, prestations).get(5, &admin()).await.unwrap();
    assert_eq!(found.prestation_title.as_deref(), Some(UNKNOWN_PRESTATION_TITLE));
}

#[tokio::test]
async fn test_illegal_transition_is_conflict() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 7, DemandeStatus::Draft))));
    repo.expect_update().never();

    let err = service(repo, MockPrestationRepository::new())
        .update_status(5, StatusChange::to(DemandeStatus::Approved), &admin())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Conflict(msg) if msg == "Cannot change demande status from DRAFT to APPROVED"
    ));
}

#[tokio::test]
async fn test_approval_defaults_to_requested_amount() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 7, DemandeStatus::InReview))));
    repo.expect_update().returning(Ok);

    let approved = service(repo, MockPrestationRepository::new())
        .update_status(5, StatusChange::to(DemandeStatus::Approved), &admin())
        .await
        .unwrap();
    assert_eq!(approved.status, DemandeStatus::Approved);
    assert_eq!(approved.approved_amount, Some(Decimal::from(400)));
    assert_eq!(approved.processed_by, Some(1));
    assert_eq!(approved.processed_by_name.as_deref(), Some("Site Admin"));
}

#[tokio::test]
async fn test_rejection_requires_reason() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(demande(id, 7, DemandeStatus::Submitted))));

    let err = service(repo, MockPrestationRepository::new())
        .update_status(5, StatusChange::to(DemandeStatus::Rejected), &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_set_priority() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_find_by_id()
        .with(eq(5))
        .returning(|id| Ok(Some(demande(id, 7, DemandeStatus::Submitted))));
    repo.expect_update()
        .withf(|d| d.priority_level == PriorityLevel::Urgent)
        .returning(Ok);

    service(repo, MockPrestationRepository::new())
        .set_priority(5, PriorityLevel::Urgent)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_my_demandes_scoped_to_caller() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_list()
        .withf(|listing, _| {
            *listing
                == DemandeListing::Mine {
                    user_id: 7,
                    status: Some(DemandeStatus::Draft),
                }
        })
        .returning(|_, _| Ok((vec![demande(1, 7, DemandeStatus::Draft)], 1)));

    let page = service(repo, MockPrestationRepository::new())
        .my_demandes(&member(), Some(DemandeStatus::Draft), PageRequest::new(1, 10))
        .await
        .unwrap();
    assert_eq!(page.total_elements, 1);
}

#[tokio::test]
async fn test_due_soon_defaults_to_one_week() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_list()
        .withf(|listing, _| match listing {
            DemandeListing::DueBetween { now, until } => *until - *now == Duration::days(7),
            _ => false,
        })
        .returning(|_, _| Ok((vec![], 0)));

    let page = service(repo, MockPrestationRepository::new())
        .due_soon(None, PageRequest::new(1, 10))
        .await
        .unwrap();
    assert!(page.empty);
}

#[tokio::test]
async fn test_due_soon_rejects_negative_days() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_list().never();

    let err = service(repo, MockPrestationRepository::new())
        .due_soon(Some(-1), PageRequest::new(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_due_soon_rejects_window_beyond_a_year() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_list().never();

    let err = service(repo, MockPrestationRepository::new())
        .due_soon(Some(i64::MAX / 2), PageRequest::new(1, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_due_soon_accepts_widest_window() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_list()
        .withf(|listing, _| match listing {
            DemandeListing::DueBetween { now, until } => {
                *until - *now == Duration::days(MAX_DUE_SOON_DAYS)
            }
            _ => false,
        })
        .returning(|_, _| Ok((vec![], 0)));

    service(repo, MockPrestationRepository::new())
        .due_soon(Some(MAX_DUE_SOON_DAYS), PageRequest::new(1, 10))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_missing_demande() {
    let mut repo = MockDemandeRepository::new();
    repo.expect_delete().with(eq(40)).returning(|_| Ok(false));

    let err = service(repo, MockPrestationRepository::new())
        .delete(40)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
