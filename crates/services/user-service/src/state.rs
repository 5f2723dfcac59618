//! Application state for dependency injection.

use std::sync::Arc;

use common::JwtKeys;

use crate::infra::Database;
use crate::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub db: Database,
    pub keys: JwtKeys,
}
