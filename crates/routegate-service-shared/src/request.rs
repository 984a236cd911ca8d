//! Request types for HTTP endpoints.

use serde::{Deserialize, Serialize};

use routegate_lib::{validate, RouteQuery, RoutingError};

/// Raw query string of `GET /api/route`.
///
/// Fields are kept as text so that a missing or garbled value surfaces as the
/// per-field `invalid_*` error instead of an extractor rejection. Absent
/// parameters are the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteParams {
    pub from_lat: String,
    pub from_lon: String,
    pub to_lat: String,
    pub to_lon: String,
}

impl RouteParams {
    /// Collect the route fields from decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = RouteParams::default();
        let mut seen = [false; 4];

        for (key, value) in pairs {
            let (slot, field) = match key.as_str() {
                "from_lat" => (0, &mut params.from_lat),
                "from_lon" => (1, &mut params.from_lon),
                "to_lat" => (2, &mut params.to_lat),
                "to_lon" => (3, &mut params.to_lon),
                _ => continue,
            };
            if !seen[slot] {
                seen[slot] = true;
                *field = value;
            }
        }

        params
    }

    /// Parse and range-check the coordinates.
    pub fn to_query(&self) -> Result<RouteQuery, RoutingError> {
        validate(&self.from_lat, &self.from_lon, &self.to_lat, &self.to_lon)
    }
}
