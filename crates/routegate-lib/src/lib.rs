//! routegate library entry points.
//!
//! This crate exposes one routing contract, [`RoutingEngine::resolve`], over
//! interchangeable upstream engines (OSRM and Valhalla). It validates inbound
//! coordinates, speaks each upstream's wire schema, normalizes geometry to a
//! precision-5 polyline, translates maneuvers into English instructions, and
//! classifies every failure as a [`RoutingError`]. HTTP services should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod engine;
pub mod error;
pub mod maneuver;
pub mod model;
pub mod polyline;
pub mod validate;

pub use engine::{
    EngineConfig, EngineInitError, EngineKind, OsrmEngine, RoutingEngine, ValhallaEngine,
};
pub use error::{ErrorKind, InputViolation, QueryField, Result, RoutingError};
pub use model::{CanonicalRoute, Coordinate, RouteQuery, RouteStep};
pub use polyline::PolylineError;
pub use validate::validate;
