//! Health check response shared by every service.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub services: BTreeMap<&'static str, ServiceHealth>,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    pub fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl HealthResponse {
    pub fn new(services: BTreeMap<&'static str, ServiceHealth>) -> Self {
        let all_healthy = services.values().all(ServiceHealth::is_healthy);
        Self {
            status: if all_healthy { "healthy" } else { "degraded" },
            services,
        }
    }
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let code = if self.status == "healthy" {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_when_any_dependency_fails() {
        let mut services = BTreeMap::new();
        services.insert("database", ServiceHealth::from_result::<String>(Ok(())));
        services.insert(
            "redis",
            ServiceHealth::from_result(Err("connection refused".to_string())),
        );

        let health = HealthResponse::new(services);
        assert_eq!(health.status, "degraded");
        assert_eq!(health.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
