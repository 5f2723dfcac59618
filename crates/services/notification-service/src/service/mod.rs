//! Notification business logic.

mod notification_service;
pub mod templates;

pub use notification_service::{
    Broadcast, ContactNotice, DemandeStatusNotice, EmailMessage, EventNotice, NewsNotice,
    NotificationManager, NotificationService,
};
