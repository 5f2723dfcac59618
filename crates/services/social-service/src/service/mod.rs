//! Social business logic.

mod avis_service;
mod dashboard_service;
mod demande_service;
mod prestation_service;

pub use avis_service::{AvisManager, AvisService};
pub use dashboard_service::{DashboardManager, DashboardService, DashboardStats};
pub use demande_service::{
    DemandeFilter, DemandeManager, DemandeService, DraftUpdate, DEFAULT_DUE_SOON_DAYS,
    MAX_DUE_SOON_DAYS, UNKNOWN_PRESTATION_TITLE,
};
pub use prestation_service::{PrestationManager, PrestationService, MOST_REQUESTED_LIMIT};
