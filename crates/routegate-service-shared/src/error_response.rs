//! Caller-facing error bodies.
//!
//! Every failed route request is answered with `{"error": <code>, "message": <text>}`.
//! The `error` code is one of a fixed set; the HTTP status is derived from the
//! [`ErrorKind`] of the underlying [`RoutingError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use routegate_lib::{ErrorKind, RoutingError};

/// Message returned when the engine reports that no route exists.
pub const MESSAGE_NO_ROUTE: &str = "Could not find a route between the specified points";

/// Message returned for engine outages and unreadable engine responses.
pub const MESSAGE_ENGINE_ERROR: &str = "Routing service temporarily unavailable";

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. `invalid_latitude`).
    pub error: String,
    /// Human-readable explanation.
    pub message: String,
    /// HTTP status for this body; not serialized.
    #[serde(skip, default = "default_status")]
    pub status: u16,
}

fn default_status() -> u16 {
    StatusCode::INTERNAL_SERVER_ERROR.as_u16()
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NoRouteFound => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::EngineUnavailable | ErrorKind::UpstreamMalformed => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

impl From<&RoutingError> for ErrorResponse {
    /// Validation details are passed through; engine failure details stay in
    /// the logs and callers get a fixed message.
    fn from(err: &RoutingError) -> Self {
        let message = match err {
            RoutingError::InvalidInput { detail, .. } => detail.clone(),
            RoutingError::NoRouteFound(_) => MESSAGE_NO_ROUTE.to_string(),
            RoutingError::EngineUnavailable(_) | RoutingError::UpstreamMalformed(_) => {
                MESSAGE_ENGINE_ERROR.to_string()
            }
        };
        Self::new(err.error_code(), message, status_for(err.kind()))
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
