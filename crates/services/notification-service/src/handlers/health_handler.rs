//! Health check handler.

use std::collections::BTreeMap;

use axum::extract::State;

use common::health::{HealthResponse, ServiceHealth};

use crate::state::AppState;

/// Health check endpoint - verifies database connectivity.
pub async fn health_check(State(state): State<AppState>) -> HealthResponse {
    let mut services = BTreeMap::new();
    services.insert("database", ServiceHealth::from_result(state.db.ping().await));
    HealthResponse::new(services)
}
