//! Application state for dependency injection.

use std::sync::Arc;

use common::rate_limit::RateLimiter;
use common::{Cache, JwtKeys};

use crate::infra::Database;
use crate::service::AuthService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub db: Database,
    pub cache: Arc<Cache>,
    pub keys: JwtKeys,
    pub rate_limiter: RateLimiter,
}
