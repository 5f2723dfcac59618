//! Route configuration.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::auth::{admin_middleware, auth_middleware};

use crate::handlers::{
    avis_handler, dashboard_handler, demande_handler, health_handler::health_check,
    prestation_handler,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let catalog_routes = Router::new()
        .route("/prestations", get(prestation_handler::list_active))
        .route(
            "/prestations/category/:category",
            get(prestation_handler::by_category),
        )
        .route("/prestations/type/:type", get(prestation_handler::by_type))
        .route("/prestations/search", get(prestation_handler::search))
        .route(
            "/prestations/popular",
            get(prestation_handler::most_requested),
        )
        .route("/prestations/:id", get(prestation_handler::get_active))
        .route("/avis", get(avis_handler::list_approved))
        .route("/avis/featured", get(avis_handler::featured))
        .route("/avis/rating", get(avis_handler::average_rating))
        .route("/avis/prestation/:id", get(avis_handler::by_prestation))
        .route(
            "/avis/prestation/:id/rating",
            get(avis_handler::prestation_rating),
        );

    let member_routes = Router::new()
        .route("/demandes", post(demande_handler::create))
        .route("/demandes/my", get(demande_handler::my_demandes))
        .route(
            "/demandes/:id",
            get(demande_handler::get).put(demande_handler::update_draft),
        )
        .route("/demandes/:id/submit", put(demande_handler::submit))
        .route("/demandes/:id/cancel", put(demande_handler::cancel))
        .route("/avis", post(avis_handler::create))
        .route("/avis/my", get(avis_handler::my_avis))
        .route_layer(middleware::from_fn_with_state(
            state.keys.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/dashboard", get(dashboard_handler::dashboard))
        .route(
            "/prestations",
            get(prestation_handler::list_all).post(prestation_handler::create),
        )
        .route("/prestations/reorder", put(prestation_handler::reorder))
        .route(
            "/prestations/:id",
            get(prestation_handler::get)
                .put(prestation_handler::update)
                .delete(prestation_handler::delete),
        )
        .route(
            "/prestations/:id/activate",
            put(prestation_handler::activate),
        )
        .route(
            "/prestations/:id/deactivate",
            put(prestation_handler::deactivate),
        )
        .route("/demandes", get(demande_handler::list))
        .route("/demandes/pending", get(demande_handler::pending))
        .route(
            "/demandes/prestation/:id",
            get(demande_handler::by_prestation),
        )
        .route("/demandes/search", get(demande_handler::search))
        .route("/demandes/overdue", get(demande_handler::overdue))
        .route("/demandes/due-soon", get(demande_handler::due_soon))
        .route(
            "/demandes/:id",
            get(demande_handler::get).delete(demande_handler::delete),
        )
        .route(
            "/demandes/:id/status",
            put(demande_handler::update_status),
        )
        .route(
            "/demandes/:id/priority",
            put(demande_handler::set_priority),
        )
        .route("/avis", get(avis_handler::pending))
        .route("/avis/type/:type", get(avis_handler::by_type))
        .route("/avis/rating/:rating", get(avis_handler::by_rating))
        .route("/avis/positive", get(avis_handler::positive))
        .route("/avis/negative", get(avis_handler::negative))
        .route("/avis/search", get(avis_handler::search))
        .route(
            "/avis/needing-response",
            get(avis_handler::needing_response),
        )
        .route("/avis/:id", delete(avis_handler::delete))
        .route("/avis/:id/approve", put(avis_handler::approve))
        .route("/avis/:id/reject", put(avis_handler::reject))
        .route("/avis/:id/respond", put(avis_handler::respond))
        .route("/avis/:id/feature", put(avis_handler::toggle_featured))
        .route_layer(middleware::from_fn_with_state(
            state.keys.clone(),
            admin_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/social", catalog_routes.merge(member_routes))
        .nest("/api/admin/social", admin_routes)
        .with_state(state)
}
