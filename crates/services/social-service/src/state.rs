//! Application state for dependency injection.

use std::sync::Arc;

use common::JwtKeys;

use crate::infra::Database;
use crate::service::{AvisService, DashboardService, DemandeService, PrestationService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub prestation_service: Arc<dyn PrestationService>,
    pub demande_service: Arc<dyn DemandeService>,
    pub avis_service: Arc<dyn AvisService>,
    pub dashboard_service: Arc<dyn DashboardService>,
    pub db: Database,
    pub keys: JwtKeys,
}
