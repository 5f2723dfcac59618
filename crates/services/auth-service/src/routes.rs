//! Route configuration.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::auth::auth_middleware;
use common::rate_limit::rate_limit_middleware;

use crate::handlers::auth_handler::{login, me, refresh, register, validate};
use crate::handlers::health_handler::health_check;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let require_auth = middleware::from_fn_with_state(state.keys.clone(), auth_middleware);

    // Credential endpoints share the stricter per-IP limit
    let limited = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh).route_layer(require_auth.clone()))
        .route_layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ));

    let auth_routes = Router::new()
        .route("/validate", post(validate))
        .route("/me", get(me).route_layer(require_auth))
        .merge(limited);

    Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/auth", auth_routes)
        .with_state(state)
}
