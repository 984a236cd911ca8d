use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::{body_snippet, build_client, normalize_base_url, transport_error, EngineKind};
use crate::error::{Result, RoutingError};
use crate::maneuver::osrm_instruction;
use crate::model::{whole_units, CanonicalRoute, RouteQuery, RouteStep};

const OK_CODE: &str = "Ok";

/// Adapter for the OSRM HTTP route service.
#[derive(Debug, Clone)]
pub struct OsrmEngine {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: String,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    #[serde(default)]
    name: String,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: String,
}

impl OsrmEngine {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url),
            client: build_client(timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Route URL for `query`. OSRM takes coordinates as `lon,lat`.
    pub fn route_url(&self, query: &RouteQuery) -> String {
        format!(
            "{}/route/v1/driving/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=polyline&steps=true",
            self.base_url,
            query.origin.lon,
            query.origin.lat,
            query.destination.lon,
            query.destination.lat,
        )
    }

    pub async fn resolve(&self, query: &RouteQuery) -> Result<CanonicalRoute> {
        let url = self.route_url(query);
        debug!(url = %url, "calling osrm");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(EngineKind::Osrm, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(EngineKind::Osrm, e))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), body = %body_snippet(&body), "osrm returned error status");
            return Err(classify_error_status(status.as_u16(), &body));
        }

        parse_response(&body)
    }
}

/// OSRM answers unroutable queries with a 4xx status and a JSON body whose
/// `code` names the reason. Such a body is a definitive no-route; anything
/// else behind an error status means the engine is unavailable.
fn classify_error_status(status: u16, body: &str) -> RoutingError {
    match serde_json::from_str::<OsrmResponse>(body) {
        Ok(response) if response.code != OK_CODE => RoutingError::NoRouteFound(format!(
            "osrm status {} code: {}",
            status, response.code
        )),
        _ => RoutingError::EngineUnavailable(format!("osrm returned status {}", status)),
    }
}

/// Convert an OSRM route response body into the canonical shape.
fn parse_response(body: &str) -> Result<CanonicalRoute> {
    let response: OsrmResponse = serde_json::from_str(body).map_err(|e| {
        RoutingError::UpstreamMalformed(format!("failed to parse osrm response: {}", e))
    })?;

    if response.code != OK_CODE {
        return Err(RoutingError::NoRouteFound(format!(
            "osrm code: {}",
            response.code
        )));
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Err(RoutingError::NoRouteFound(
            "osrm returned no routes".to_string(),
        ));
    };

    let steps = route
        .legs
        .into_iter()
        .next()
        .map(|leg| leg.steps.into_iter().map(to_step).collect())
        .unwrap_or_default();

    Ok(CanonicalRoute {
        distance_meters: whole_units(route.distance),
        duration_seconds: whole_units(route.duration),
        geometry: route.geometry,
        steps,
    })
}

fn to_step(step: OsrmStep) -> RouteStep {
    RouteStep {
        instruction: osrm_instruction(&step.maneuver.kind, &step.name),
        distance_meters: whole_units(step.distance),
        duration_seconds: whole_units(step.duration),
        name: step.name,
    }
}
