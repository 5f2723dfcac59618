//! Repository layer for data access.

pub mod entities;
mod notification_repository;

pub use notification_repository::{NewNotification, NotificationRepository, NotificationStore};

#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
