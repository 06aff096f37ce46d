//! Health check handler.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    #[schema(example = "ok")]
    pub status: &'static str,
    pub services: ServiceHealth,
}

/// Individual service health status
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    pub database: ServiceStatus,
    pub redis: ServiceStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(example = "healthy")]
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceStatus {
    fn from_probe<E: std::fmt::Display>(probe: Option<Result<(), E>>) -> Self {
        match probe {
            Some(Ok(())) => Self {
                status: "healthy",
                error: None,
            },
            Some(Err(e)) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
            None => Self {
                status: "unhealthy",
                error: Some("not configured".to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Database and Redis connectivity
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 503, description = "A dependency is unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.database.as_ref() {
        Some(db) => Some(db.ping().await),
        None => None,
    };
    let redis = match state.cache.as_ref() {
        Some(cache) => Some(cache.ping().await),
        None => None,
    };

    let services = ServiceHealth {
        database: ServiceStatus::from_probe(database),
        redis: ServiceStatus::from_probe(redis),
    };
    let all_healthy = services.database.is_healthy() && services.redis.is_healthy();

    if !all_healthy {
        tracing::warn!(?services, "Health check degraded");
    }

    let response = HealthResponse {
        status: if all_healthy { "ok" } else { "degraded" },
        services,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_outcomes() {
        let ok = ServiceStatus::from_probe::<String>(Some(Ok(())));
        assert!(ok.is_healthy());
        assert!(ok.error.is_none());

        let failed = ServiceStatus::from_probe(Some(Err("connection refused")));
        assert!(!failed.is_healthy());
        assert_eq!(failed.error.as_deref(), Some("connection refused"));

        let missing = ServiceStatus::from_probe::<String>(None);
        assert!(!missing.is_healthy());
    }
}
