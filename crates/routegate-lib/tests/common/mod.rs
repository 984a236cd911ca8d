//! Shared helpers for adapter integration tests.
//!
//! Each test spins up an in-process axum server standing in for the upstream
//! routing engine and points an adapter at it.

#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use routegate_lib::{Coordinate, RouteQuery};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake upstream serves");
    });
    format!("http://{}", addr)
}

/// Base URL of a port that nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn berlin_to_potsdam() -> RouteQuery {
    RouteQuery::new(
        Coordinate::new(52.52, 13.405),
        Coordinate::new(52.3906, 13.0645),
    )
}

pub const SHORT_TIMEOUT: Duration = Duration::from_millis(200);
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);
