//! Back-office dashboard handler.

use axum::{extract::State, response::Json};

use common::AppResult;

use crate::service::DashboardStats;
use crate::state::AppState;

/// Social activity statistics
#[utoipa::path(
    get,
    path = "/api/admin/social/dashboard",
    tag = "Admin Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Demande, prestation and avis aggregates", body = DashboardStats),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.dashboard_service.stats().await?))
}
