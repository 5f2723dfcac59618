//! Application state for dependency injection.

use std::sync::Arc;

use common::JwtKeys;

use crate::infra::Database;
use crate::service::{
    ContactService, EventService, FoundationInfoService, NewsService, PartnerService, SiteService,
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub news_service: Arc<dyn NewsService>,
    pub event_service: Arc<dyn EventService>,
    pub partner_service: Arc<dyn PartnerService>,
    pub foundation_info_service: Arc<dyn FoundationInfoService>,
    pub contact_service: Arc<dyn ContactService>,
    pub site_service: Arc<dyn SiteService>,
    pub db: Database,
    pub keys: JwtKeys,
}
