//! Application state for the routing gateway.
//!
//! Holds the engine adapter selected at startup. Handlers reach it through
//! axum's `State` extractor; the engine never changes while the process runs.

use std::sync::Arc;

use routegate_lib::{EngineConfig, EngineInitError, EngineKind, RoutingEngine};

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally). The inner `reqwest::Client` pools
/// connections, so every clone shares one pool.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use routegate_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let engine = state.engine();
///     // ... resolve a route
/// }
///
/// let state = AppState::from_config(&ServiceConfig::from_env().engine).unwrap();
/// let app = Router::new()
///     .route("/api/route", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    engine: RoutingEngine,
}

impl AppState {
    /// Build the adapter named by `config` and wrap it in shared state.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineInitError> {
        let engine = RoutingEngine::from_config(config)?;
        tracing::info!(
            engine = %engine.kind(),
            url = engine.base_url(),
            "routing engine selected"
        );
        Ok(Self::new(engine))
    }

    /// Create state from an already constructed engine.
    pub fn new(engine: RoutingEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner { engine }),
        }
    }

    pub fn engine(&self) -> &RoutingEngine {
        &self.inner.engine
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.inner.engine.kind()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.inner.engine.kind())
            .field("base_url", &self.inner.engine.base_url())
            .finish()
    }
}
