//! Repository layer for data access.

pub mod entities;
mod contact_repository;
mod event_repository;
mod foundation_info_repository;
mod news_repository;
mod partner_repository;
mod site_info_repository;

pub use contact_repository::{ContactFilter, ContactRepository, ContactStore};
pub use event_repository::{EventListing, EventRepository, EventStore};
pub use foundation_info_repository::{FoundationInfoRepository, FoundationInfoStore};
pub use news_repository::{NewsListing, NewsRepository, NewsStore};
pub use partner_repository::{PartnerRepository, PartnerStore};
pub use site_info_repository::{SiteInfoRepository, SiteInfoStore};

#[cfg(any(test, feature = "test-utils"))]
pub use contact_repository::MockContactRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use event_repository::MockEventRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use foundation_info_repository::MockFoundationInfoRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use news_repository::MockNewsRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use partner_repository::MockPartnerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use site_info_repository::MockSiteInfoRepository;
