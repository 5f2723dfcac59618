//! Dashboard aggregation tests.

use std::sync::Arc;

use mockall::predicate::eq;
use rust_decimal::Decimal;

use common::AppError;
use social_service_lib::repository::{
    AvisStats, DemandeStats, MockAvisRepository, MockDemandeRepository, MockPrestationRepository,
};
use social_service_lib::service::{DashboardManager, DashboardService};

fn prestations() -> MockPrestationRepository {
    let mut repo = MockPrestationRepository::new();
    repo.expect_count().with(eq(false)).returning(|_| Ok(9));
    repo.expect_count().with(eq(true)).returning(|_| Ok(6));
    repo
}

#[tokio::test]
async fn test_stats_combine_every_aggregate() {
    let mut demandes = MockDemandeRepository::new();
    demandes.expect_stats().returning(|| {
        Ok(DemandeStats {
            total: 20,
            pending: 5,
            approved: 8,
            rejected: 3,
            paid: 4,
            total_requested_amount: Decimal::new(1_250_000, 2),
            total_approved_amount: Decimal::new(600_000, 2),
            total_paid_amount: Decimal::new(250_000, 2),
            average_processing_days: 4.5,
        })
    });
    let mut avis = MockAvisRepository::new();
    avis.expect_stats().returning(|| {
        Ok(AvisStats {
            total: 11,
            average_rating: 4.2,
            positive: 8,
            negative: 1,
        })
    });

    let stats = DashboardManager::new(Arc::new(demandes), Arc::new(prestations()), Arc::new(avis))
        .stats()
        .await
        .unwrap();

    assert_eq!(stats.total_demandes, 20);
    assert_eq!(stats.pending_demandes, 5);
    assert_eq!(stats.paid_demandes, 4);
    assert_eq!(stats.total_approved_amount, Decimal::new(600_000, 2));
    assert_eq!(stats.total_prestations, 9);
    assert_eq!(stats.active_prestations, 6);
    assert_eq!(stats.total_avis, 11);
    assert_eq!(stats.negative_avis, 1);
    assert_eq!(stats.average_processing_days, 4.5);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["activePrestations"], 6);
    assert_eq!(json["averageRating"], 4.2);
}

#[tokio::test]
async fn test_stats_fail_when_any_query_fails() {
    let mut demandes = MockDemandeRepository::new();
    demandes
        .expect_stats()
        .returning(|| Err(AppError::internal("connection reset")));
    let mut avis = MockAvisRepository::new();
    avis.expect_stats().returning(|| Ok(AvisStats::default()));

    let err = DashboardManager::new(Arc::new(demandes), Arc::new(prestations()), Arc::new(avis))
        .stats()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}
