//! Route configuration.

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::auth::{admin_middleware, auth_middleware};

use crate::handlers::{admin_handler, health_handler::health_check, profile_handler};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Multipart framing on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main router with all routes.
pub fn create_router(state: AppState, upload_dir: &Path, max_avatar_bytes: usize) -> Router {
    let profile_routes = Router::new()
        .route(
            "/me",
            get(profile_handler::get_me).put(profile_handler::update_me),
        )
        .route(
            "/me/avatar",
            post(profile_handler::upload_avatar)
                .layer(DefaultBodyLimit::max(max_avatar_bytes + MULTIPART_OVERHEAD_BYTES)),
        )
        .route_layer(middleware::from_fn_with_state(
            state.keys.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/", get(admin_handler::list_users))
        .route(
            "/:id",
            get(admin_handler::get_user)
                .put(admin_handler::update_user)
                .delete(admin_handler::delete_user),
        )
        .route("/:id/roles", put(admin_handler::set_roles))
        .route("/:id/restore", post(admin_handler::restore_user))
        .route_layer(middleware::from_fn_with_state(
            state.keys.clone(),
            admin_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/users", profile_routes)
        .nest("/api/admin/users", admin_routes)
        .nest_service("/files", ServeDir::new(upload_dir))
        .with_state(state)
}
