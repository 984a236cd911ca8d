mod common;

use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use common::{berlin_to_potsdam, closed_port_url, spawn_upstream, SHORT_TIMEOUT, TEST_TIMEOUT};
use routegate_lib::{ErrorKind, OsrmEngine, RouteStep};

const SCENARIO: &str = r#"{"code":"Ok","routes":[{"distance":1500.4,"duration":180.2,"geometry":"abc",
    "legs":[{"steps":[{"distance":1500.4,"duration":180.2,"name":"Main St","maneuver":{"type":"turn"}}]}]}]}"#;

fn fixed_upstream(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/route/v1/driving/{coords}",
        get(move || async move { (status, body) }),
    )
}

#[tokio::test]
async fn resolves_scenario_route() {
    let seen = Arc::new(Mutex::new(None::<(String, String)>));
    let recorder = seen.clone();
    let router = Router::new().route(
        "/route/v1/driving/{coords}",
        get(move |Path(coords): Path<String>, RawQuery(query): RawQuery| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = Some((coords, query.unwrap_or_default()));
                (StatusCode::OK, SCENARIO)
            }
        }),
    );
    let base = spawn_upstream(router).await;
    let engine = OsrmEngine::new(&base, TEST_TIMEOUT).unwrap();

    let route = engine.resolve(&berlin_to_potsdam()).await.unwrap();

    assert_eq!(route.distance_meters, 1500);
    assert_eq!(route.duration_seconds, 180);
    assert_eq!(route.geometry, "abc");
    assert_eq!(
        route.steps,
        vec![RouteStep {
            instruction: "Turn on Main St".to_string(),
            distance_meters: 1500,
            duration_seconds: 180,
            name: "Main St".to_string(),
        }]
    );

    let (coords, query) = seen.lock().unwrap().clone().expect("upstream was called");
    assert_eq!(coords, "13.405000,52.520000;13.064500,52.390600");
    assert_eq!(query, "overview=full&geometries=polyline&steps=true");
}

#[tokio::test]
async fn non_ok_code_is_no_route() {
    let base = spawn_upstream(fixed_upstream(
        StatusCode::OK,
        r#"{"code":"NoRoute","message":"Impossible route between points"}"#,
    ))
    .await;
    let engine = OsrmEngine::new(&base, TEST_TIMEOUT).unwrap();

    let err = engine.resolve(&berlin_to_potsdam()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoRouteFound);
}

#[tokio::test]
async fn bad_request_with_no_route_code_is_no_route() {
    let base = spawn_upstream(fixed_upstream(
        StatusCode::BAD_REQUEST,
        r#"{"code":"NoRoute","message":"Impossible route between points"}"#,
    ))
    .await;
    let engine = OsrmEngine::new(&base, TEST_TIMEOUT).unwrap();

    let err = engine.resolve(&berlin_to_potsdam()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoRouteFound);
}

#[tokio::test]
async fn empty_routes_is_no_route() {
    let base = spawn_upstream(fixed_upstream(StatusCode::OK, r#"{"code":"Ok","routes":[]}"#)).await;
    let engine = OsrmEngine::new(&base, TEST_TIMEOUT).unwrap();

    let err = engine.resolve(&berlin_to_potsdam()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoRouteFound);
}

#[tokio::test]
async fn error_status_is_unavailable() {
    let base = spawn_upstream(fixed_upstream(
        StatusCode::INTERNAL_SERVER_ERROR,
        "upstream exploded",
    ))
    .await;
    let engine = OsrmEngine::new(&base, TEST_TIMEOUT).unwrap();

    let err = engine.resolve(&berlin_to_potsdam()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EngineUnavailable);
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn garbage_body_is_malformed() {
    let base = spawn_upstream(fixed_upstream(StatusCode::OK, "<html>oops</html>")).await;
    let engine = OsrmEngine::new(&base, TEST_TIMEOUT).unwrap();

    let err = engine.resolve(&berlin_to_potsdam()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamMalformed);
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let router = Router::new().route(
        "/route/v1/driving/{coords}",
        get(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            (StatusCode::OK, SCENARIO)
        }),
    );
    let base = spawn_upstream(router).await;
    let engine = OsrmEngine::new(&base, SHORT_TIMEOUT).unwrap();

    let err = engine.resolve(&berlin_to_potsdam()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EngineUnavailable);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn refused_connection_is_unavailable() {
    let engine = OsrmEngine::new(&closed_port_url().await, TEST_TIMEOUT).unwrap();

    let err = engine.resolve(&berlin_to_potsdam()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EngineUnavailable);
}
