use std::fmt;

use thiserror::Error;

/// Convenient result alias for the routegate library.
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Inbound query parameter that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    FromLat,
    FromLon,
    ToLat,
    ToLon,
}

impl QueryField {
    /// Query parameter name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryField::FromLat => "from_lat",
            QueryField::FromLon => "from_lon",
            QueryField::ToLat => "to_lat",
            QueryField::ToLon => "to_lon",
        }
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason an inbound coordinate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputViolation {
    /// The named field is not a finite decimal number.
    Unparsable(QueryField),
    /// A latitude fell outside [-90, 90].
    LatitudeOutOfRange,
    /// A longitude fell outside [-180, 180].
    LongitudeOutOfRange,
}

/// The four caller-facing failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NoRouteFound,
    EngineUnavailable,
    UpstreamMalformed,
}

impl ErrorKind {
    /// Stable label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NoRouteFound => "no_route_found",
            ErrorKind::EngineUnavailable => "engine_unavailable",
            ErrorKind::UpstreamMalformed => "upstream_malformed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level routing error.
///
/// Adapters and the validator always return one of these variants directly,
/// so callers classify failures by matching on the variant rather than by
/// inspecting message text.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The inbound request carried an unusable coordinate.
    #[error("{detail}")]
    InvalidInput {
        violation: InputViolation,
        detail: String,
    },

    /// The engine answered definitively that no route exists.
    #[error("no route found: {0}")]
    NoRouteFound(String),

    /// Transport failure, timeout, or non-success status from the engine.
    #[error("routing engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine answered successfully but the body could not be understood.
    #[error("malformed upstream response: {0}")]
    UpstreamMalformed(String),
}

impl RoutingError {
    pub fn unparsable(field: QueryField) -> Self {
        RoutingError::InvalidInput {
            violation: InputViolation::Unparsable(field),
            detail: format!("{} must be a valid number", field),
        }
    }

    pub fn latitude_out_of_range() -> Self {
        RoutingError::InvalidInput {
            violation: InputViolation::LatitudeOutOfRange,
            detail: "latitude must be between -90 and 90".to_string(),
        }
    }

    pub fn longitude_out_of_range() -> Self {
        RoutingError::InvalidInput {
            violation: InputViolation::LongitudeOutOfRange,
            detail: "longitude must be between -180 and 180".to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RoutingError::InvalidInput { .. } => ErrorKind::InvalidInput,
            RoutingError::NoRouteFound(_) => ErrorKind::NoRouteFound,
            RoutingError::EngineUnavailable(_) => ErrorKind::EngineUnavailable,
            RoutingError::UpstreamMalformed(_) => ErrorKind::UpstreamMalformed,
        }
    }

    /// Machine-readable code placed in the `error` field of HTTP responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RoutingError::InvalidInput { violation, .. } => match violation {
                InputViolation::Unparsable(QueryField::FromLat) => "invalid_from_lat",
                InputViolation::Unparsable(QueryField::FromLon) => "invalid_from_lon",
                InputViolation::Unparsable(QueryField::ToLat) => "invalid_to_lat",
                InputViolation::Unparsable(QueryField::ToLon) => "invalid_to_lon",
                InputViolation::LatitudeOutOfRange => "invalid_latitude",
                InputViolation::LongitudeOutOfRange => "invalid_longitude",
            },
            RoutingError::NoRouteFound(_) => "no_route_found",
            RoutingError::EngineUnavailable(_) | RoutingError::UpstreamMalformed(_) => {
                "routing_engine_error"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_detail_names_field() {
        let err = RoutingError::unparsable(QueryField::ToLon);
        assert_eq!(err.to_string(), "to_lon must be a valid number");
        assert_eq!(err.error_code(), "invalid_to_lon");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn range_errors_distinguish_latitude_and_longitude() {
        let lat = RoutingError::latitude_out_of_range();
        let lon = RoutingError::longitude_out_of_range();

        assert_eq!(lat.error_code(), "invalid_latitude");
        assert_eq!(lon.error_code(), "invalid_longitude");
        assert!(lat.to_string().contains("latitude"));
        assert!(lon.to_string().contains("longitude"));
    }

    #[test]
    fn engine_failures_share_wire_code_but_not_kind() {
        let unavailable = RoutingError::EngineUnavailable("timeout".to_string());
        let malformed = RoutingError::UpstreamMalformed("expected value".to_string());

        assert_eq!(unavailable.error_code(), "routing_engine_error");
        assert_eq!(malformed.error_code(), "routing_engine_error");
        assert_ne!(unavailable.kind(), malformed.kind());
    }

    #[test]
    fn no_route_has_its_own_code() {
        let err = RoutingError::NoRouteFound("x".to_string());
        assert_eq!(err.error_code(), "no_route_found");
        assert_eq!(err.kind().as_str(), "no_route_found");
    }
}
