//! Application state for dependency injection.

use std::sync::Arc;

use common::JwtKeys;

use crate::infra::Database;
use crate::service::NotificationService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub notification_service: Arc<dyn NotificationService>,
    pub db: Database,
    pub keys: JwtKeys,
}
