//! Startup configuration for the routing gateway.
//!
//! Read once in `main` and passed explicitly into [`crate::AppState`]; nothing
//! in the request path reads the environment.
//!
//! # Environment Variables
//!
//! - `ROUTING_ENGINE`: `osrm` (default) or `valhalla`
//! - `OSRM_HOST`: OSRM base URL (default: `http://osrm:5000`)
//! - `VALHALLA_HOST`: Valhalla base URL (default: `http://valhalla:8002`)
//! - `SERVICE_PORT`: HTTP port (default: 8000)

use routegate_lib::engine::{DEFAULT_OSRM_URL, DEFAULT_VALHALLA_URL};
use routegate_lib::{EngineConfig, EngineKind};
use tracing::warn;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub port: u16,
    pub engine: EngineConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            engine: EngineConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let kind = match get("ROUTING_ENGINE") {
            None => EngineKind::default(),
            Some(value) => EngineKind::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "unknown ROUTING_ENGINE, falling back to osrm");
                EngineKind::Osrm
            }),
        };

        let port = match get("SERVICE_PORT") {
            None => DEFAULT_PORT,
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                warn!(value = %value, default = DEFAULT_PORT, "invalid SERVICE_PORT, using default");
                DEFAULT_PORT
            }),
        };

        let engine = EngineConfig {
            kind,
            osrm_url: get("OSRM_HOST").unwrap_or_else(|| DEFAULT_OSRM_URL.to_string()),
            valhalla_url: get("VALHALLA_HOST").unwrap_or_else(|| DEFAULT_VALHALLA_URL.to_string()),
            ..EngineConfig::default()
        };

        Self { port, engine }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.engine.kind, EngineKind::Osrm);
        assert_eq!(config.engine.osrm_url, "http://osrm:5000");
    }

    #[test]
    fn test_selects_valhalla() {
        let config = config_from(&[
            ("ROUTING_ENGINE", "Valhalla"),
            ("VALHALLA_HOST", "http://10.0.0.5:8002"),
        ]);
        assert_eq!(config.engine.kind, EngineKind::Valhalla);
        assert_eq!(config.engine.selected_url(), "http://10.0.0.5:8002");
    }

    #[test]
    fn test_unknown_engine_falls_back_to_osrm() {
        let config = config_from(&[("ROUTING_ENGINE", "graphhopper")]);
        assert_eq!(config.engine.kind, EngineKind::Osrm);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config_from(&[("ROUTING_ENGINE", ""), ("OSRM_HOST", "  ")]);
        assert_eq!(config.engine.kind, EngineKind::Osrm);
        assert_eq!(config.engine.osrm_url, "http://osrm:5000");
    }

    #[test]
    fn test_port_parsing() {
        assert_eq!(config_from(&[("SERVICE_PORT", "9090")]).port, 9090);
        assert_eq!(config_from(&[("SERVICE_PORT", "not-a-port")]).port, 8000);
    }
}
