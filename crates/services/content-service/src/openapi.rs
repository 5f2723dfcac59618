//! OpenAPI documentation.

use utoipa::OpenApi;

use common::openapi::SecurityAddon;
use domain::{
    ContactMessage, ContactStatus, ContentStatus, Event, EventType, FoundationInfo, HomeContent,
    InfoType, News, Partner, SiteInfo, SiteStats,
};

use crate::handlers::contact_handler::{ContactRequest, RespondRequest, StatusRequest};
use crate::handlers::event_handler::{CreateEventRequest, UpdateEventRequest};
use crate::handlers::foundation_info_handler::{
    CreateFoundationInfoRequest, UpdateFoundationInfoRequest,
};
use crate::handlers::news_handler::NewsRequest;
use crate::handlers::partner_handler::PartnerRequest;
use crate::handlers::site_handler::SiteInfoRequest;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::site_handler::home,
        crate::handlers::site_handler::get_site_info,
        crate::handlers::site_handler::update_site_info,
        crate::handlers::news_handler::list_published,
        crate::handlers::news_handler::get_by_slug,
        crate::handlers::news_handler::featured,
        crate::handlers::news_handler::popular,
        crate::handlers::news_handler::list_all,
        crate::handlers::news_handler::create,
        crate::handlers::news_handler::get,
        crate::handlers::news_handler::update,
        crate::handlers::news_handler::publish,
        crate::handlers::news_handler::unpublish,
        crate::handlers::news_handler::toggle_featured,
        crate::handlers::news_handler::delete,
        crate::handlers::event_handler::list_public,
        crate::handlers::event_handler::upcoming,
        crate::handlers::event_handler::past,
        crate::handlers::event_handler::by_type,
        crate::handlers::event_handler::search,
        crate::handlers::event_handler::next,
        crate::handlers::event_handler::get_public,
        crate::handlers::event_handler::register,
        crate::handlers::event_handler::unregister,
        crate::handlers::event_handler::list_all,
        crate::handlers::event_handler::create,
        crate::handlers::event_handler::get,
        crate::handlers::event_handler::update,
        crate::handlers::event_handler::publish,
        crate::handlers::event_handler::unpublish,
        crate::handlers::event_handler::delete,
        crate::handlers::partner_handler::list_partners,
        crate::handlers::partner_handler::get_partner,
        crate::handlers::partner_handler::create_partner,
        crate::handlers::partner_handler::update_partner,
        crate::handlers::partner_handler::delete_partner,
        crate::handlers::foundation_info_handler::list_active,
        crate::handlers::foundation_info_handler::get_by_type,
        crate::handlers::foundation_info_handler::get_by_types,
        crate::handlers::foundation_info_handler::list_all,
        crate::handlers::foundation_info_handler::get,
        crate::handlers::foundation_info_handler::create,
        crate::handlers::foundation_info_handler::update,
        crate::handlers::foundation_info_handler::activate,
        crate::handlers::foundation_info_handler::deactivate,
        crate::handlers::foundation_info_handler::reorder,
        crate::handlers::foundation_info_handler::delete,
        crate::handlers::contact_handler::submit,
        crate::handlers::contact_handler::list,
        crate::handlers::contact_handler::search,
        crate::handlers::contact_handler::filter,
        crate::handlers::contact_handler::by_status,
        crate::handlers::contact_handler::get,
        crate::handlers::contact_handler::mark_handled,
        crate::handlers::contact_handler::set_status,
        crate::handlers::contact_handler::respond,
        crate::handlers::contact_handler::delete,
    ),
    components(schemas(
        News, Event, Partner, FoundationInfo, ContactMessage, SiteInfo, SiteStats, HomeContent,
        ContentStatus, EventType, InfoType, ContactStatus,
        NewsRequest, CreateEventRequest, UpdateEventRequest, PartnerRequest,
        CreateFoundationInfoRequest, UpdateFoundationInfoRequest,
        ContactRequest, StatusRequest, RespondRequest, SiteInfoRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Public", description = "Public site content"),
        (name = "News", description = "News highlights"),
        (name = "Events", description = "Event agenda and registration"),
        (name = "Foundation Info", description = "Foundation presentation blocks"),
        (name = "Admin News", description = "News administration"),
        (name = "Admin Events", description = "Event administration"),
        (name = "Admin Partners", description = "Partner administration"),
        (name = "Admin Foundation Info", description = "Foundation info administration"),
        (name = "Admin Contact", description = "Contact message inbox"),
        (name = "Admin Site", description = "Home page administration"),
    )
)]
pub struct ApiDoc;
