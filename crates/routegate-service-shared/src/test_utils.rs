//! Test utilities for gateway handler testing.
//!
//! Handler tests run against an in-process axum server standing in for the
//! upstream engine. [`spawn_upstream`] binds it to an ephemeral port and the
//! state helpers point an adapter at the returned URL.

use std::time::Duration;

use axum::Router;
use routegate_lib::{EngineConfig, EngineKind};

use crate::state::AppState;

/// Upstream deadline used by test state, short enough to keep timeout tests fast.
pub const TEST_UPSTREAM_TIMEOUT: Duration = Duration::from_millis(500);

/// Fixture bodies in each upstream's wire format.
pub mod fixtures {
    /// OSRM `/route/v1/driving` success with a single turn step.
    pub const OSRM_ROUTE_OK: &str = r#"{
        "code": "Ok",
        "routes": [{
            "distance": 1500.4,
            "duration": 180.2,
            "geometry": "abc",
            "legs": [{
                "steps": [{
                    "distance": 1500.4,
                    "duration": 180.2,
                    "name": "Main St",
                    "maneuver": {"type": "turn"}
                }]
            }]
        }]
    }"#;

    /// OSRM answer when the points cannot be connected.
    pub const OSRM_NO_ROUTE: &str =
        r#"{"code":"NoRoute","message":"Impossible route between points","routes":[]}"#;

    /// Valhalla `/route` success; the shape is precision 6.
    pub const VALHALLA_ROUTE_OK: &str = r#"{"trip":{"status":0,"status_message":"Found route between points",
        "legs":[{"shape":"_izlhA~rlgdF_{geC~ywl@_kwzCn`{nI","summary":{"length":2.5,"time":300.0},
        "maneuvers":[
            {"type":1,"instruction":"Drive north on Main St.","street_names":["Main St"],"length":2.5,"time":300.0},
            {"type":4,"instruction":"You have arrived at your destination.","length":0.0,"time":0.0}
        ]}]}}"#;

    /// The Valhalla fixture shape re-encoded at precision 5.
    pub const VALHALLA_ROUTE_OK_GEOMETRY: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    /// Valhalla trip-level failure.
    pub const VALHALLA_NO_ROUTE: &str =
        r#"{"trip":{"status":1,"status_message":"No path could be found for input","legs":[]}}"#;
}

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// # Panics
///
/// Panics if the loopback listener cannot be bound.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("fake upstream serves");
    });
    format!("http://{}", addr)
}

/// Base URL of a local port with no listener.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

/// State bound to the given engine at `base_url` with the test deadline.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
pub fn test_state(kind: EngineKind, base_url: &str) -> AppState {
    let config = EngineConfig {
        kind,
        osrm_url: base_url.to_string(),
        valhalla_url: base_url.to_string(),
        osrm_timeout: TEST_UPSTREAM_TIMEOUT,
        valhalla_timeout: TEST_UPSTREAM_TIMEOUT,
    };
    AppState::from_config(&config)
        .unwrap_or_else(|e| panic!("failed to build test state for {}: {}", base_url, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[test]
    fn test_state_binds_selected_engine() {
        let state = test_state(EngineKind::Valhalla, "http://127.0.0.1:9/");
        assert_eq!(state.engine_kind(), EngineKind::Valhalla);
        assert_eq!(state.engine().base_url(), "http://127.0.0.1:9");
    }

    #[test]
    fn test_fixtures_are_json() {
        for body in [
            fixtures::OSRM_ROUTE_OK,
            fixtures::OSRM_NO_ROUTE,
            fixtures::VALHALLA_ROUTE_OK,
            fixtures::VALHALLA_NO_ROUTE,
        ] {
            serde_json::from_str::<serde_json::Value>(body).unwrap();
        }
    }

    #[tokio::test]
    async fn test_spawn_upstream_returns_loopback_url() {
        let url = spawn_upstream(Router::new().route("/", get(|| async { "ok" }))).await;
        assert!(url.starts_with("http://127.0.0.1:"));
    }
}
