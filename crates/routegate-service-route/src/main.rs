//! routegate route gateway binary.
//!
//! # Configuration
//!
//! - `ROUTING_ENGINE` - `osrm` (default) or `valhalla`
//! - `OSRM_HOST` - OSRM base URL (default: http://osrm:5000)
//! - `VALHALLA_HOST` - Valhalla base URL (default: http://valhalla:8002)
//! - `SERVICE_PORT` - HTTP port (default: 8000)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus endpoint

use std::net::SocketAddr;

use tracing::{error, info, warn};

use routegate_service_route::build_router;
use routegate_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, MetricsError,
    ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    match init_metrics(&metrics_config) {
        Ok(()) => {}
        Err(MetricsError::Disabled) => info!("metrics disabled"),
        Err(e) => {
            warn!(error = %e, "failed to initialize metrics, continuing without metrics");
        }
    }

    let config = ServiceConfig::from_env();
    info!(
        engine = %config.engine.kind,
        url = config.engine.selected_url(),
        port = config.port,
        "starting routing gateway"
    );

    let state = AppState::from_config(&config.engine).map_err(|e| {
        error!(error = %e, "failed to initialize routing engine");
        e
    })?;

    let app = build_router(state, &metrics_config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("received shutdown signal, draining connections");
}
