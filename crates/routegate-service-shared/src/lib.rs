//! Shared infrastructure for routegate HTTP services.
//!
//! This crate provides the HTTP glue around `routegate-lib`:
//!
//! - [`AppState`]: The engine adapter bound at startup
//! - [`ServiceConfig`]: Engine selection, upstream URLs and listen port
//! - [`health`]: Liveness/readiness probe handlers
//! - [`ErrorResponse`]: The `{error, message}` body and status mapping
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request ID propagation and HTTP metrics
//! - [`RouteParams`]: Raw query parameters of the route endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; all routing behavior lives in `routegate-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Extract query parameters                                 │
//! │  - Validate coordinates                                     │
//! │  - Call RoutingEngine::resolve                              │
//! │  - Map RoutingError to status + ErrorResponse               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fake upstream server and fixture
//! bodies. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod error_response;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use error_response::{status_for, ErrorResponse, MESSAGE_ENGINE_ERROR, MESSAGE_NO_ROUTE};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_route_failed, record_route_resolved,
    record_upstream_latency, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use request::RouteParams;
pub use state::AppState;
