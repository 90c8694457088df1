//! Error types for the routing library.

use thiserror::Error;

use super::coordinate::LngLat;

/// Routing error type.
///
/// Every variant is recoverable at the orchestration boundary: a failed
/// route for one destination must not abort route computation for the
/// others. The computation is deterministic, so retries are meaningless;
/// a failure indicates an input or configuration problem.
#[derive(Error, Debug)]
pub enum RoutingError {
    /// The central region input is not a well-formed rectangle.
    #[error("invalid central region {name:?}: {reason}")]
    InvalidRegion { name: String, reason: String },

    /// A no-fly zone vertex ring is too short or not closed.
    #[error("invalid no-fly zone {name:?}: {reason}")]
    InvalidZone { name: String, reason: String },

    /// The search frontier emptied before reaching the destination.
    #[error("no route found from {from:?} to {to:?}")]
    NoRouteFound { from: LngLat, to: LngLat },

    /// The request cannot be routed as posed, e.g. an endpoint inside a
    /// no-fly zone.
    #[error("degenerate route request: {0}")]
    DegenerateRequest(String),
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, RoutingError>;
