//! Routing engine selection.
//!
//! This module provides:
//! - [`EngineKind`] - The supported upstream engines
//! - [`EngineConfig`] - Base URLs and timeouts read once at startup
//! - [`RoutingEngine`] - The adapter bound for the lifetime of the process
//!
//! Only two backends exist, so the adapters form a closed enum rather than a
//! trait object. [`RoutingEngine::resolve`] dispatches to the selected
//! adapter and always yields either a [`CanonicalRoute`] or one of the
//! [`RoutingError`] kinds.
//!
//! # Example
//!
//! ```no_run
//! use routegate_lib::{validate, EngineConfig, EngineKind, RoutingEngine};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EngineConfig {
//!     kind: EngineKind::Valhalla,
//!     ..EngineConfig::default()
//! };
//! let engine = RoutingEngine::from_config(&config)?;
//! let query = validate("52.52", "13.405", "52.50", "13.42")?;
//! let route = engine.resolve(&query).await?;
//! println!("{} m in {} steps", route.distance_meters, route.steps.len());
//! # Ok(())
//! # }
//! ```

mod osrm;
mod valhalla;

pub use osrm::OsrmEngine;
pub use valhalla::ValhallaEngine;

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::error::{Result, RoutingError};
use crate::model::{CanonicalRoute, RouteQuery};

/// Outbound deadline for OSRM calls.
pub const OSRM_TIMEOUT: Duration = Duration::from_secs(5);

/// Outbound deadline for Valhalla calls.
pub const VALHALLA_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_OSRM_URL: &str = "http://osrm:5000";
pub const DEFAULT_VALHALLA_URL: &str = "http://valhalla:8002";

/// Upper bound on upstream body text copied into error details.
const BODY_SNIPPET_CHARS: usize = 200;

/// Supported upstream engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Osrm,
    Valhalla,
}

impl EngineKind {
    /// Parse an engine name, ignoring case. Returns `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "osrm" => Some(EngineKind::Osrm),
            "valhalla" => Some(EngineKind::Valhalla),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Osrm => "osrm",
            EngineKind::Valhalla => "valhalla",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-lifetime engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Engine that serves every request.
    pub kind: EngineKind,
    /// OSRM base URL, without trailing slash.
    pub osrm_url: String,
    /// Valhalla base URL, without trailing slash.
    pub valhalla_url: String,
    pub osrm_timeout: Duration,
    pub valhalla_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            valhalla_url: DEFAULT_VALHALLA_URL.to_string(),
            osrm_timeout: OSRM_TIMEOUT,
            valhalla_timeout: VALHALLA_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Base URL of the selected engine.
    pub fn selected_url(&self) -> &str {
        match self.kind {
            EngineKind::Osrm => &self.osrm_url,
            EngineKind::Valhalla => &self.valhalla_url,
        }
    }
}

/// Raised when the adapter for the configured engine cannot be constructed.
#[derive(Debug, Error)]
#[error("failed to build HTTP client for {engine}: {source}")]
pub struct EngineInitError {
    pub engine: EngineKind,
    #[source]
    pub source: reqwest::Error,
}

/// The adapter chosen at startup.
#[derive(Debug, Clone)]
pub enum RoutingEngine {
    Osrm(OsrmEngine),
    Valhalla(ValhallaEngine),
}

impl RoutingEngine {
    /// Bind the adapter named by `config.kind`.
    pub fn from_config(config: &EngineConfig) -> std::result::Result<Self, EngineInitError> {
        let engine = match config.kind {
            EngineKind::Osrm => {
                OsrmEngine::new(&config.osrm_url, config.osrm_timeout).map(RoutingEngine::Osrm)
            }
            EngineKind::Valhalla => {
                ValhallaEngine::new(&config.valhalla_url, config.valhalla_timeout)
                    .map(RoutingEngine::Valhalla)
            }
        };

        engine.map_err(|source| EngineInitError {
            engine: config.kind,
            source,
        })
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            RoutingEngine::Osrm(_) => EngineKind::Osrm,
            RoutingEngine::Valhalla(_) => EngineKind::Valhalla,
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            RoutingEngine::Osrm(engine) => engine.base_url(),
            RoutingEngine::Valhalla(engine) => engine.base_url(),
        }
    }

    /// Resolve a route through the selected engine.
    ///
    /// The returned future owns the outbound request; dropping it aborts the
    /// call.
    pub async fn resolve(&self, query: &RouteQuery) -> Result<CanonicalRoute> {
        match self {
            RoutingEngine::Osrm(engine) => engine.resolve(query).await,
            RoutingEngine::Valhalla(engine) => engine.resolve(query).await,
        }
    }
}

fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn transport_error(engine: EngineKind, err: reqwest::Error) -> RoutingError {
    let detail = if err.is_timeout() {
        format!("{} request timed out", engine)
    } else if err.is_connect() {
        format!("{} connection failed: {}", engine, err)
    } else {
        format!("{} request failed: {}", engine, err)
    };
    RoutingError::EngineUnavailable(detail)
}

fn body_snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}
