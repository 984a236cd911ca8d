//! Inbound coordinate validation.

use crate::error::{QueryField, Result, RoutingError};
use crate::model::{Coordinate, RouteQuery};

const LAT_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
const LON_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Parse and range-check the four raw query values.
///
/// Fields are parsed in wire order, so the first unparsable one is reported.
/// Once all four parse, both latitudes are checked before either longitude.
pub fn validate(from_lat: &str, from_lon: &str, to_lat: &str, to_lon: &str) -> Result<RouteQuery> {
    let from_lat = parse_degrees(from_lat, QueryField::FromLat)?;
    let from_lon = parse_degrees(from_lon, QueryField::FromLon)?;
    let to_lat = parse_degrees(to_lat, QueryField::ToLat)?;
    let to_lon = parse_degrees(to_lon, QueryField::ToLon)?;

    if !LAT_RANGE.contains(&from_lat) || !LAT_RANGE.contains(&to_lat) {
        return Err(RoutingError::latitude_out_of_range());
    }
    if !LON_RANGE.contains(&from_lon) || !LON_RANGE.contains(&to_lon) {
        return Err(RoutingError::longitude_out_of_range());
    }

    Ok(RouteQuery::new(
        Coordinate::new(from_lat, from_lon),
        Coordinate::new(to_lat, to_lon),
    ))
}

fn parse_degrees(raw: &str, field: QueryField) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RoutingError::unparsable(field)),
    }
}
