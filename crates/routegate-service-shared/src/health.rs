//! Health check handlers for container probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses. Neither probe calls the upstream engine.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use routegate_lib::EngineKind;

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator, always "ok" when the handler answers.
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Engine serving requests (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Base URL of the selected engine (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_url: Option<String>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            engine: None,
            engine_url: None,
        }
    }

    /// Create a ready status naming the bound engine.
    pub fn ready(service: &str, version: &str, engine: EngineKind, engine_url: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            engine: Some(engine.to_string()),
            engine_url: Some(engine_url.to_string()),
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"routegate-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// The engine adapter is bound before the listener opens, so a running
/// process is always ready.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"routegate-service-shared","version":"0.1.0","engine":"osrm","engine_url":"http://osrm:5000"}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine();
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        engine.kind(),
        engine.base_url(),
    );
    (StatusCode::OK, Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use routegate_lib::EngineConfig;

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("route", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "route");
        assert!(status.engine.is_none());

        let json = serde_json::to_value(&status).unwrap();
        assert!(json.get("engine").is_none());
        assert!(json.get("engine_url").is_none());
    }

    #[test]
    fn test_health_status_ready() {
        let status = HealthStatus::ready("route", "1.0.0", EngineKind::Valhalla, "http://v:8002");
        assert_eq!(status.engine.as_deref(), Some("valhalla"));
        assert_eq!(status.engine_url.as_deref(), Some("http://v:8002"));
    }

    #[tokio::test]
    async fn test_health_ready_reports_engine() {
        let state = AppState::from_config(&EngineConfig::default()).unwrap();
        let response = health_ready(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_live_ok() {
        let response = health_live().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
