//! OpenAPI documentation.

use utoipa::OpenApi;

use common::openapi::SecurityAddon;
use domain::{
    Avis, AvisStatus, AvisType, Demande, DemandeStatus, Prestation, PrestationCategory,
    PrestationType, PriorityLevel,
};

use crate::handlers::avis_handler::{
    CreateAvisRequest, RatingResponse, RejectRequest, RespondRequest,
};
use crate::handlers::demande_handler::{
    CreateDemandeRequest, PriorityRequest, StatusRequest, UpdateDemandeRequest,
};
use crate::handlers::prestation_handler::{CreatePrestationRequest, UpdatePrestationRequest};
use crate::service::DashboardStats;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::prestation_handler::list_active,
        crate::handlers::prestation_handler::by_category,
        crate::handlers::prestation_handler::by_type,
        crate::handlers::prestation_handler::search,
        crate::handlers::prestation_handler::most_requested,
        crate::handlers::prestation_handler::get_active,
        crate::handlers::prestation_handler::list_all,
        crate::handlers::prestation_handler::create,
        crate::handlers::prestation_handler::get,
        crate::handlers::prestation_handler::update,
        crate::handlers::prestation_handler::activate,
        crate::handlers::prestation_handler::deactivate,
        crate::handlers::prestation_handler::reorder,
        crate::handlers::prestation_handler::delete,
        crate::handlers::demande_handler::create,
        crate::handlers::demande_handler::my_demandes,
        crate::handlers::demande_handler::get,
        crate::handlers::demande_handler::update_draft,
        crate::handlers::demande_handler::submit,
        crate::handlers::demande_handler::cancel,
        crate::handlers::demande_handler::list,
        crate::handlers::demande_handler::pending,
        crate::handlers::demande_handler::by_prestation,
        crate::handlers::demande_handler::search,
        crate::handlers::demande_handler::overdue,
        crate::handlers::demande_handler::due_soon,
        crate::handlers::demande_handler::update_status,
        crate::handlers::demande_handler::set_priority,
        crate::handlers::demande_handler::delete,
        crate::handlers::avis_handler::create,
        crate::handlers::avis_handler::my_avis,
        crate::handlers::avis_handler::list_approved,
        crate::handlers::avis_handler::featured,
        crate::handlers::avis_handler::by_prestation,
        crate::handlers::avis_handler::average_rating,
        crate::handlers::avis_handler::prestation_rating,
        crate::handlers::avis_handler::pending,
        crate::handlers::avis_handler::approve,
        crate::handlers::avis_handler::reject,
        crate::handlers::avis_handler::respond,
        crate::handlers::avis_handler::toggle_featured,
        crate::handlers::avis_handler::by_type,
        crate::handlers::avis_handler::by_rating,
        crate::handlers::avis_handler::positive,
        crate::handlers::avis_handler::negative,
        crate::handlers::avis_handler::search,
        crate::handlers::avis_handler::needing_response,
        crate::handlers::avis_handler::delete,
        crate::handlers::dashboard_handler::dashboard,
    ),
    components(schemas(
        Prestation, Demande, Avis, DashboardStats,
        PrestationCategory, PrestationType, DemandeStatus, PriorityLevel, AvisStatus, AvisType,
        CreatePrestationRequest, UpdatePrestationRequest,
        CreateDemandeRequest, UpdateDemandeRequest, StatusRequest, PriorityRequest,
        CreateAvisRequest, RejectRequest, RespondRequest, RatingResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Prestations", description = "Social aid catalog"),
        (name = "Demandes", description = "Aid requests of the signed-in user"),
        (name = "Avis", description = "Reviews of prestations"),
        (name = "Admin Prestations", description = "Catalog administration"),
        (name = "Admin Demandes", description = "Demande processing"),
        (name = "Admin Avis", description = "Avis moderation"),
        (name = "Admin Dashboard", description = "Social activity statistics"),
    )
)]
pub struct ApiDoc;
