//! Route configuration.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::auth::auth_middleware;

use crate::handlers::{health_handler::health_check, inbox_handler, notify_handler};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let notify_routes = Router::new()
        .route("/email", post(notify_handler::send_email))
        .route("/contact", post(notify_handler::contact))
        .route("/demande-status", post(notify_handler::demande_status))
        .route("/news-published", post(notify_handler::news_published))
        .route("/event-published", post(notify_handler::event_published));

    let inbox_routes = Router::new()
        .route("/my", get(inbox_handler::my_notifications))
        .route("/my/unread-count", get(inbox_handler::unread_count))
        .route("/:id/read", put(inbox_handler::mark_read))
        .route_layer(middleware::from_fn_with_state(
            state.keys.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/notify", notify_routes)
        .nest("/api/notifications", inbox_routes)
        .with_state(state)
}
