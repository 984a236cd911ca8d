use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{body_snippet, build_client, normalize_base_url, transport_error, EngineKind};
use crate::error::{Result, RoutingError};
use crate::maneuver::{is_valhalla_destination, valhalla_instruction};
use crate::model::{km_to_meters, whole_units, CanonicalRoute, RouteQuery, RouteStep};
use crate::polyline::{self, PRECISION_5, PRECISION_6};

const COSTING: &str = "auto";
const ALTERNATES: u32 = 2;
const UNITS: &str = "kilometers";

/// Adapter for the Valhalla `/route` action.
#[derive(Debug, Clone)]
pub struct ValhallaEngine {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ValhallaRequest {
    locations: [ValhallaLocation; 2],
    costing: &'static str,
    alternates: u32,
    units: &'static str,
}

#[derive(Debug, Serialize)]
struct ValhallaLocation {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ValhallaResponse {
    trip: ValhallaTrip,
}

#[derive(Debug, Deserialize)]
struct ValhallaTrip {
    #[serde(default)]
    legs: Vec<ValhallaLeg>,
    #[serde(default)]
    status: i64,
    #[serde(default)]
    status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValhallaLeg {
    #[serde(default)]
    maneuvers: Vec<ValhallaManeuver>,
    summary: ValhallaSummary,
    /// Precision-6 encoded polyline.
    shape: String,
}

#[derive(Debug, Deserialize)]
struct ValhallaManeuver {
    #[serde(rename = "type")]
    kind: u32,
    #[serde(default)]
    instruction: String,
    #[serde(default)]
    street_names: Vec<String>,
    /// Kilometers.
    length: f64,
    /// Seconds.
    time: f64,
}

#[derive(Debug, Deserialize)]
struct ValhallaSummary {
    /// Kilometers.
    length: f64,
    /// Seconds.
    time: f64,
}

impl ValhallaEngine {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url),
            client: build_client(timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn resolve(&self, query: &RouteQuery) -> Result<CanonicalRoute> {
        let url = format!("{}/route", self.base_url);
        let request = build_request(query);
        debug!(url = %url, "calling valhalla");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(EngineKind::Valhalla, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(EngineKind::Valhalla, e))?;

        if status != StatusCode::OK {
            debug!(status = status.as_u16(), body = %body_snippet(&body), "valhalla returned error status");
            return Err(RoutingError::EngineUnavailable(format!(
                "valhalla returned status {}: {}",
                status.as_u16(),
                body_snippet(&body)
            )));
        }

        parse_response(&body)
    }
}

fn build_request(query: &RouteQuery) -> ValhallaRequest {
    ValhallaRequest {
        locations: [
            ValhallaLocation {
                lat: query.origin.lat,
                lon: query.origin.lon,
            },
            ValhallaLocation {
                lat: query.destination.lat,
                lon: query.destination.lon,
            },
        ],
        costing: COSTING,
        alternates: ALTERNATES,
        units: UNITS,
    }
}

/// Convert a Valhalla route response body into the canonical shape.
fn parse_response(body: &str) -> Result<CanonicalRoute> {
    let response: ValhallaResponse = serde_json::from_str(body).map_err(|e| {
        RoutingError::UpstreamMalformed(format!("failed to parse valhalla response: {}", e))
    })?;
    let trip = response.trip;

    if trip.status != 0 {
        if let Some(message) = trip.status_message.filter(|m| !m.is_empty()) {
            return Err(RoutingError::NoRouteFound(format!(
                "valhalla status {}: {}",
                trip.status, message
            )));
        }
    }

    let Some(leg) = trip.legs.into_iter().next() else {
        return Err(RoutingError::NoRouteFound(
            "valhalla returned no legs".to_string(),
        ));
    };

    let geometry = polyline::reencode(&leg.shape, PRECISION_6, PRECISION_5).map_err(|e| {
        RoutingError::UpstreamMalformed(format!("invalid valhalla leg shape: {}", e))
    })?;

    let steps = leg
        .maneuvers
        .into_iter()
        .filter(|m| !(is_valhalla_destination(m.kind) && m.length == 0.0))
        .map(to_step)
        .collect();

    Ok(CanonicalRoute {
        distance_meters: km_to_meters(leg.summary.length),
        duration_seconds: whole_units(leg.summary.time),
        geometry,
        steps,
    })
}

fn to_step(maneuver: ValhallaManeuver) -> RouteStep {
    let instruction = if maneuver.instruction.is_empty() {
        valhalla_instruction(maneuver.kind, &maneuver.street_names)
    } else {
        maneuver.instruction
    };
    let name = maneuver.street_names.into_iter().next().unwrap_or_default();

    RouteStep {
        instruction,
        distance_meters: km_to_meters(maneuver.length),
        duration_seconds: whole_units(maneuver.time),
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::Coordinate;

    // Reference points (38.5,-120.2) (40.7,-120.95) (43.252,-126.453) at precision 6.
    const SHAPE6: &str = "_izlhA~rlgdF_{geC~ywl@_kwzCn`{nI";
    const SHAPE5: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn leg_body(maneuvers: &str) -> String {
        format!(
            r#"{{"trip":{{"status":0,"status_message":"Found route between points",
                "legs":[{{"shape":"{}","summary":{{"length":2.5678,"time":301.9}},
                "maneuvers":[{}]}}]}}}}"#,
            SHAPE6, maneuvers
        )
    }

    #[test]
    fn request_body_matches_upstream_schema() {
        let query = RouteQuery::new(Coordinate::new(1.5, 2.5), Coordinate::new(3.5, 4.5));
        let json = serde_json::to_value(build_request(&query)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "locations": [{"lat": 1.5, "lon": 2.5}, {"lat": 3.5, "lon": 4.5}],
                "costing": "auto",
                "alternates": 2,
                "units": "kilometers"
            })
        );
    }

    #[test]
    fn converts_units_and_reencodes_shape() {
        let body = leg_body(
            r#"{"type":1,"instruction":"Drive north on Main St.","street_names":["Main St"],"length":1.2349,"time":120.7}"#,
        );
        let route = parse_response(&body).unwrap();

        assert_eq!(route.distance_meters, 2567);
        assert_eq!(route.duration_seconds, 301);
        assert_eq!(route.geometry, SHAPE5);
        assert_eq!(
            route.steps,
            vec![RouteStep {
                instruction: "Drive north on Main St.".to_string(),
                distance_meters: 1234,
                duration_seconds: 120,
                name: "Main St".to_string(),
            }]
        );
    }

    #[test]
    fn synthesizes_missing_instruction() {
        let body = leg_body(
            r#"{"type":15,"instruction":"","street_names":["Elm St","CA-9"],"length":0.5,"time":30}"#,
        );
        let route = parse_response(&body).unwrap();

        assert_eq!(route.steps[0].instruction, "Turn left on Elm St");
        assert_eq!(route.steps[0].name, "Elm St");
        assert_eq!(route.steps[0].distance_meters, 500);
    }

    #[test]
    fn skips_zero_length_destination_maneuvers() {
        let body = leg_body(
            r#"{"type":1,"length":1.0,"time":60},
               {"type":4,"length":0.0,"time":0},
               {"type":5,"length":0,"time":0},
               {"type":6,"length":0.0,"time":0}"#,
        );
        let route = parse_response(&body).unwrap();

        assert_eq!(route.steps.len(), 1);
        assert_eq!(route.steps[0].instruction, "Head");
    }

    #[test]
    fn keeps_destination_with_length() {
        let body = leg_body(
            r#"{"type":5,"street_names":["Harbor Rd"],"length":0.02,"time":4}"#,
        );
        let route = parse_response(&body).unwrap();

        assert_eq!(route.steps.len(), 1);
        assert_eq!(route.steps[0].instruction, "Arrive at destination");
        assert_eq!(route.steps[0].name, "Harbor Rd");
        assert_eq!(route.steps[0].distance_meters, 20);
    }

    #[test]
    fn keeps_zero_length_non_destination() {
        let body = leg_body(r#"{"type":8,"length":0.0,"time":0}"#);
        let route = parse_response(&body).unwrap();
        assert_eq!(route.steps.len(), 1);
        assert_eq!(route.steps[0].instruction, "Continue");
    }

    #[test]
    fn trip_failure_with_message_is_no_route() {
        let body = r#"{"trip":{"status":1,"status_message":"No path could be found","legs":[]}}"#;
        let err = parse_response(body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NoRouteFound);
        assert!(err.to_string().contains("No path could be found"));
    }

    #[test]
    fn empty_legs_is_no_route() {
        let err = parse_response(r#"{"trip":{"status":0,"legs":[]}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoRouteFound);
    }

    #[test]
    fn nonzero_status_without_message_uses_legs() {
        let body = format!(
            r#"{{"trip":{{"status":3,"legs":[{{"shape":"{}","summary":{{"length":1,"time":1}},"maneuvers":[]}}]}}}}"#,
            SHAPE6
        );
        let route = parse_response(&body).unwrap();
        assert_eq!(route.distance_meters, 1000);
    }

    #[test]
    fn broken_shape_is_malformed() {
        let body = r#"{"trip":{"status":0,"legs":[{"shape":"_","summary":{"length":1,"time":1},"maneuvers":[]}]}}"#;
        let err = parse_response(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamMalformed);
    }

    #[test]
    fn unparsable_body_is_malformed() {
        assert_eq!(
            parse_response("not json").unwrap_err().kind(),
            ErrorKind::UpstreamMalformed
        );
        assert_eq!(
            parse_response(r#"{"error":"x"}"#).unwrap_err().kind(),
            ErrorKind::UpstreamMalformed
        );
    }
}
