//! Route configuration.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::auth::{admin_middleware, auth_middleware};

use crate::handlers::{
    contact_handler, event_handler, foundation_info_handler, health_handler::health_check,
    news_handler, partner_handler, site_handler,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/home", get(site_handler::home))
        .route("/news", get(news_handler::list_published))
        .route("/news/:slug", get(news_handler::get_by_slug))
        .route("/events", get(event_handler::list_public))
        .route("/partners", get(partner_handler::list_partners))
        .route("/contact", post(contact_handler::submit));

    let news_routes = Router::new()
        .route("/featured", get(news_handler::featured))
        .route("/popular", get(news_handler::popular));

    let registration_routes = Router::new()
        .route("/:id/register", post(event_handler::register))
        .route("/:id/unregister", post(event_handler::unregister))
        .route_layer(middleware::from_fn_with_state(
            state.keys.clone(),
            auth_middleware,
        ));

    let event_routes = Router::new()
        .route("/upcoming", get(event_handler::upcoming))
        .route("/past", get(event_handler::past))
        .route("/type/:type", get(event_handler::by_type))
        .route("/search", get(event_handler::search))
        .route("/next", get(event_handler::next))
        .route("/:id", get(event_handler::get_public))
        .merge(registration_routes);

    let foundation_info_routes = Router::new()
        .route("/active", get(foundation_info_handler::list_active))
        .route("/type/:type", get(foundation_info_handler::get_by_type))
        .route("/types", post(foundation_info_handler::get_by_types));

    let admin_routes = Router::new()
        .route(
            "/news",
            get(news_handler::list_all).post(news_handler::create),
        )
        .route(
            "/news/:id",
            get(news_handler::get)
                .put(news_handler::update)
                .delete(news_handler::delete),
        )
        .route("/news/:id/publish", put(news_handler::publish))
        .route("/news/:id/unpublish", put(news_handler::unpublish))
        .route("/news/:id/feature", put(news_handler::toggle_featured))
        .route(
            "/events",
            get(event_handler::list_all).post(event_handler::create),
        )
        .route(
            "/events/:id",
            get(event_handler::get)
                .put(event_handler::update)
                .delete(event_handler::delete),
        )
        .route("/events/:id/publish", put(event_handler::publish))
        .route("/events/:id/unpublish", put(event_handler::unpublish))
        .route(
            "/partners",
            get(partner_handler::list_partners).post(partner_handler::create_partner),
        )
        .route(
            "/partners/:id",
            get(partner_handler::get_partner)
                .put(partner_handler::update_partner)
                .delete(partner_handler::delete_partner),
        )
        .route(
            "/foundation-info",
            get(foundation_info_handler::list_all).post(foundation_info_handler::create),
        )
        .route(
            "/foundation-info/reorder",
            put(foundation_info_handler::reorder),
        )
        .route(
            "/foundation-info/:id",
            get(foundation_info_handler::get)
                .put(foundation_info_handler::update)
                .delete(foundation_info_handler::delete),
        )
        .route(
            "/foundation-info/:id/activate",
            put(foundation_info_handler::activate),
        )
        .route(
            "/foundation-info/:id/deactivate",
            put(foundation_info_handler::deactivate),
        )
        .route("/contact-messages", get(contact_handler::list))
        .route("/contact-messages/search", get(contact_handler::search))
        .route("/contact-messages/filter", get(contact_handler::filter))
        .route(
            "/contact-messages/status/:status",
            get(contact_handler::by_status),
        )
        .route(
            "/contact-messages/:id",
            get(contact_handler::get).delete(contact_handler::delete),
        )
        .route(
            "/contact-messages/:id/handle",
            put(contact_handler::mark_handled),
        )
        .route(
            "/contact-messages/:id/status",
            put(contact_handler::set_status),
        )
        .route(
            "/contact-messages/:id/respond",
            post(contact_handler::respond),
        )
        .route(
            "/site-info",
            get(site_handler::get_site_info).put(site_handler::update_site_info),
        )
        .route_layer(middleware::from_fn_with_state(
            state.keys.clone(),
            admin_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/public", public_routes)
        .nest("/api/news", news_routes)
        .nest("/api/events", event_routes)
        .nest("/api/foundation-info", foundation_info_routes)
        .nest("/api/admin", admin_routes)
        .with_state(state)
}
