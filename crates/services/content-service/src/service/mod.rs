//! Content business logic.

mod contact_service;
mod event_service;
mod foundation_info_service;
mod news_service;
mod partner_service;
mod site_service;

pub use contact_service::{ContactManager, ContactService};
pub use event_service::{EventManager, EventService, NEXT_EVENTS_LIMIT};
pub use foundation_info_service::{FoundationInfoManager, FoundationInfoService};
pub use news_service::{NewsManager, NewsService, POPULAR_NEWS_LIMIT};
pub use partner_service::{PartnerManager, PartnerService};
pub use site_service::{SiteManager, SiteService, SiteUpdate};
