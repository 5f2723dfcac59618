//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Types here are shared by every service of the foundation backend: the
//! accounts and profiles of staff members, published content, the social
//! aid workflow (prestations, demandes, avis) and notifications.

#[macro_use]
mod macros;

pub mod account;
pub mod avis;
pub mod constants;
pub mod content;
pub mod demande;
pub mod error;
pub mod notification;
pub mod password;
pub mod prestation;
pub mod profile;

pub use account::{Account, AccountStatus, NewAccount, UserRole};
pub use avis::{validate_rating, Avis, AvisDraft, AvisStatus, AvisType, ANONYMOUS_USER_NAME};
pub use constants::*;
pub use content::{
    slugify, ContactMessage, ContactStatus, ContentStatus, Event, EventChanges, EventDraft,
    EventType, FoundationInfo, FoundationInfoChanges, FoundationInfoDraft, HomeContent,
    InfoType, NewContactMessage, News, NewsDraft, Partner, PartnerDraft, SiteInfo, SiteStats,
    DEFAULT_MINISTRY_CONTENT, DEFAULT_MISSION,
};
pub use demande::{Actor, Applicant, Demande, DemandeDraft, DemandeStatus, PriorityLevel, StatusChange};
pub use error::{DomainError, DomainResult};
pub use notification::{Notification, NotificationStatus, NotificationType};
pub use password::Password;
pub use prestation::{
    Prestation, PrestationCategory, PrestationChanges, PrestationDraft, PrestationType,
};
pub use profile::{ProfileChanges, UserProfile};
