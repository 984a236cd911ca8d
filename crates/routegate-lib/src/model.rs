//! Engine-agnostic route model.
//!
//! These are the only shapes that leave the library. Each adapter keeps its
//! upstream wire types private and converts into [`CanonicalRoute`] before
//! returning, so callers see the same fields whichever engine answered.

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A validated origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

impl RouteQuery {
    /// Build a query from already-validated coordinates.
    ///
    /// Inbound requests should go through [`crate::validate`] instead, which
    /// enforces the latitude/longitude ranges.
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Route returned to callers regardless of the engine that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRoute {
    pub distance_meters: u64,
    pub duration_seconds: u64,
    /// Encoded polyline at precision 1e5.
    pub geometry: String,
    pub steps: Vec<RouteStep>,
}

/// A single turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    pub instruction: String,
    pub distance_meters: u64,
    pub duration_seconds: u64,
    /// Street name; empty when the engine reports none.
    pub name: String,
}

/// Truncate an upstream float quantity to a whole unit.
///
/// Negative and NaN inputs saturate to zero.
pub(crate) fn whole_units(value: f64) -> u64 {
    value as u64
}

/// Convert an upstream length in kilometers to whole meters.
pub(crate) fn km_to_meters(km: f64) -> u64 {
    whole_units(km * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_units_truncates() {
        assert_eq!(whole_units(1500.9), 1500);
        assert_eq!(whole_units(0.2), 0);
        assert_eq!(whole_units(-3.0), 0);
        assert_eq!(whole_units(f64::NAN), 0);
    }

    #[test]
    fn km_to_meters_truncates_after_scaling() {
        assert_eq!(km_to_meters(1.2345), 1234);
        assert_eq!(km_to_meters(0.0), 0);
    }

    #[test]
    fn canonical_route_serializes_wire_field_names() {
        let route = CanonicalRoute {
            distance_meters: 10,
            duration_seconds: 2,
            geometry: "??".to_string(),
            steps: vec![RouteStep {
                instruction: "Head".to_string(),
                distance_meters: 10,
                duration_seconds: 2,
                name: String::new(),
            }],
        };
        let json = serde_json::to_value(&route).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "distance_meters": 10,
                "duration_seconds": 2,
                "geometry": "??",
                "steps": [{
                    "instruction": "Head",
                    "distance_meters": 10,
                    "duration_seconds": 2,
                    "name": ""
                }]
            })
        );
    }
}
