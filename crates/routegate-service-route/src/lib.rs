//! routegate HTTP gateway.
//!
//! Exposes one engine-agnostic route endpoint in front of whichever upstream
//! engine was selected at startup.
//!
//! # Endpoints
//!
//! - `GET /api/route?from_lat=&from_lon=&to_lat=&to_lon=` - Resolve a route
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! Successful responses carry the canonical route JSON. Failures carry
//! `{"error", "message"}` with status 400 (invalid input), 422 (no route) or
//! 503 (engine unavailable or unreadable upstream response).

#![deny(warnings)]

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};

use routegate_lib::{CanonicalRoute, ErrorKind, RoutingError};
use routegate_service_shared::{
    extract_or_generate_request_id, health_live, health_ready, metrics_handler,
    record_route_failed, record_route_resolved, record_upstream_latency, AppState, ErrorResponse,
    MetricsConfig, MetricsLayer, RouteParams,
};

/// Path of the route endpoint.
pub const ROUTE_PATH: &str = "/api/route";

/// Assemble the gateway router.
///
/// `/metrics` is mounted at `metrics.path` unless metrics are disabled.
pub fn build_router(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router = Router::new()
        .route(ROUTE_PATH, get(route_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `GET /api/route`.
///
/// Coordinates are validated before the engine is touched; an invalid query
/// never produces an outbound call. Repeated keys keep their first value and
/// an unreadable query string is treated as one with no parameters, so every
/// rejection carries the JSON error body.
pub async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<CanonicalRoute>, ErrorResponse> {
    let request_id = extract_or_generate_request_id(&headers);
    let engine = state.engine();
    let kind = engine.kind();

    let params = match pairs {
        Ok(Query(pairs)) => RouteParams::from_pairs(pairs),
        Err(rejection) => {
            debug!(request_id = %request_id, error = %rejection, "unreadable query string");
            RouteParams::default()
        }
    };

    let query = match params.to_query() {
        Ok(query) => query,
        Err(err) => {
            info!(
                request_id = %request_id,
                engine = %kind,
                code = err.error_code(),
                error = %err,
                "rejected route request"
            );
            record_route_failed(kind, err.kind());
            return Err(ErrorResponse::from(&err));
        }
    };

    info!(
        request_id = %request_id,
        engine = %kind,
        origin_lat = query.origin.lat,
        origin_lon = query.origin.lon,
        destination_lat = query.destination.lat,
        destination_lon = query.destination.lon,
        "resolving route"
    );

    let started = Instant::now();
    let outcome = engine.resolve(&query).await;
    record_upstream_latency(kind, started.elapsed());

    match outcome {
        Ok(route) => {
            info!(
                request_id = %request_id,
                engine = %kind,
                distance_meters = route.distance_meters,
                duration_seconds = route.duration_seconds,
                steps = route.steps.len(),
                "route resolved"
            );
            record_route_resolved(kind, route.steps.len());
            Ok(Json(route))
        }
        Err(err) => {
            log_failure(request_id.as_str(), kind.as_str(), &err);
            record_route_failed(kind, err.kind());
            Err(ErrorResponse::from(&err))
        }
    }
}

fn log_failure(request_id: &str, engine: &str, err: &RoutingError) {
    let kind = err.kind().as_str();
    match err.kind() {
        ErrorKind::UpstreamMalformed => {
            error!(request_id, engine, kind, error = %err, "route resolution failed");
        }
        _ => {
            warn!(request_id, engine, kind, error = %err, "route resolution failed");
        }
    }
}
