//! Drone Delivery Routing Library.
//! Computes collision-free flightpaths around no-fly zones and handles
//! the surrounding delivery-day workflow: order validation, one route
//! per restaurant, and the serializable output records.

pub mod types {
    pub mod coordinate;
    pub mod error;
    pub mod node;
    pub mod order;
    pub mod region;
}

pub mod utils {
    pub mod airspace;
    pub mod geometry;
    pub mod validation;
}

pub mod algorithms {
    pub mod route;
}

pub mod delivery;

pub use algorithms::route::{round_trip, RouteFinder};
pub use types::coordinate::LngLat;
pub use types::error::{Result, RoutingError};
pub use types::node::{Move, MoveCost, PathNode};
pub use types::region::NamedRegion;
pub use utils::airspace::Airspace;
