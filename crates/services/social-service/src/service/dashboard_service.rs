//! Dashboard service - back-office statistics.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::try_join;
use utoipa::ToSchema;

use common::AppResult;

use crate::repository::{
    AvisRepository, AvisStats, DemandeRepository, DemandeStats, PrestationRepository,
};

/// Social activity overview.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_demandes: u64,
    pub pending_demandes: u64,
    pub approved_demandes: u64,
    pub rejected_demandes: u64,
    pub paid_demandes: u64,
    pub total_requested_amount: Decimal,
    pub total_approved_amount: Decimal,
    pub total_paid_amount: Decimal,
    pub total_prestations: u64,
    pub active_prestations: u64,
    pub total_avis: u64,
    pub average_rating: f64,
    pub positive_avis: u64,
    pub negative_avis: u64,
    pub average_processing_days: f64,
}

impl DashboardStats {
    fn assemble(
        demandes: DemandeStats,
        total_prestations: u64,
        active_prestations: u64,
        avis: AvisStats,
    ) -> Self {
        Self {
            total_demandes: demandes.total,
            pending_demandes: demandes.pending,
            approved_demandes: demandes.approved,
            rejected_demandes: demandes.rejected,
            paid_demandes: demandes.paid,
            total_requested_amount: demandes.total_requested_amount,
            total_approved_amount: demandes.total_approved_amount,
            total_paid_amount: demandes.total_paid_amount,
            total_prestations,
            active_prestations,
            total_avis: avis.total,
            average_rating: avis.average_rating,
            positive_avis: avis.positive,
            negative_avis: avis.negative,
            average_processing_days: demandes.average_processing_days,
        }
    }
}

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> AppResult<DashboardStats>;
}

pub struct DashboardManager {
    demandes: Arc<dyn DemandeRepository>,
    prestations: Arc<dyn PrestationRepository>,
    avis: Arc<dyn AvisRepository>,
}

impl DashboardManager {
    pub fn new(
        demandes: Arc<dyn DemandeRepository>,
        prestations: Arc<dyn PrestationRepository>,
        avis: Arc<dyn AvisRepository>,
    ) -> Self {
        Self {
            demandes,
            prestations,
            avis,
        }
    }
}

#[async_trait]
impl DashboardService for DashboardManager {
    async fn stats(&self) -> AppResult<DashboardStats> {
        let (demandes, total_prestations, active_prestations, avis) = try_join!(
            self.demandes.stats(),
            self.prestations.count(false),
            self.prestations.count(true),
            self.avis.stats(),
        )?;

        Ok(DashboardStats::assemble(
            demandes,
            total_prestations,
            active_prestations,
            avis,
        ))
    }
}
