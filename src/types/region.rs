//! Region types: the raw polygons served to the drone and their
//! validated, preprocessed forms.

use serde::Deserialize;

use super::coordinate::LngLat;
use super::error::{Result, RoutingError};

/// A named polygon exactly as the data service delivers it: a display
/// name plus an ordered vertex ring. Unvalidated; both
/// [`CentralRegion`] and [`NoFlyZone`] are built from one of these.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRegion {
    pub name: String,
    pub vertices: Vec<LngLat>,
}

impl NamedRegion {
    pub fn new(name: &str, vertices: Vec<LngLat>) -> NamedRegion {
        NamedRegion {
            name: name.to_string(),
            vertices,
        }
    }
}

/// The rectangular central region the drone operates over.
///
/// Built from exactly four vertices in ring order top-left, top-right,
/// bottom-right, bottom-left. The corner names, not the polygon shape,
/// drive the containment comparison, which is why this type is kept
/// apart from the general polygon machinery.
#[derive(Debug, Clone)]
pub struct CentralRegion {
    pub name: String,
    pub top_left: LngLat,
    pub top_right: LngLat,
    pub bottom_right: LngLat,
    pub bottom_left: LngLat,
}

impl CentralRegion {
    /// Validates a raw region as the central rectangle.
    pub fn from_region(region: &NamedRegion) -> Result<CentralRegion> {
        if region.vertices.len() != 4 {
            return Err(RoutingError::InvalidRegion {
                name: region.name.clone(),
                reason: format!("expected 4 vertices, got {}", region.vertices.len()),
            });
        }
        Ok(CentralRegion {
            name: region.name.clone(),
            top_left: region.vertices[0],
            top_right: region.vertices[1],
            bottom_right: region.vertices[2],
            bottom_left: region.vertices[3],
        })
    }
}

/// Slope of a line between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slope {
    /// Both endpoints share a longitude.
    Vertical,
    Finite(f64),
}

impl Slope {
    /// Slope of the line from `a` to `b`.
    pub fn between(a: LngLat, b: LngLat) -> Slope {
        if a.lng() == b.lng() {
            Slope::Vertical
        } else {
            Slope::Finite((a.lat() - b.lat()) / (a.lng() - b.lng()))
        }
    }
}

/// A directed edge of a no-fly zone, endpoints reordered so the one with
/// the higher (or equal) latitude comes first. The crossing test in
/// [`crate::utils::airspace`] consumes edges in this form.
#[derive(Debug, Clone, Copy)]
pub struct ZoneEdge {
    /// Endpoint with the higher or equal latitude.
    pub upper: LngLat,
    /// Endpoint with the lower latitude.
    pub lower: LngLat,
    pub slope: Slope,
}

impl ZoneEdge {
    fn between(first: LngLat, second: LngLat) -> ZoneEdge {
        let (upper, lower) = if first.lat() >= second.lat() {
            (first, second)
        } else {
            (second, first)
        };
        ZoneEdge {
            upper,
            lower,
            slope: Slope::between(upper, lower),
        }
    }

    /// Westernmost longitude of the edge.
    pub fn min_lng(&self) -> f64 {
        self.upper.lng().min(self.lower.lng())
    }

    /// Easternmost longitude of the edge.
    pub fn max_lng(&self) -> f64 {
        self.upper.lng().max(self.lower.lng())
    }
}

/// A no-fly zone: a named closed polygon the drone must never enter,
/// preprocessed into its edge list.
///
/// The input ring must already repeat its first vertex as its last
/// element. Preprocessing pairs consecutive vertices into exactly
/// `len - 1` edges and never synthesizes a closing edge, so an unclosed
/// ring is rejected up front rather than silently losing its last edge.
#[derive(Debug, Clone)]
pub struct NoFlyZone {
    pub name: String,
    /// The original ring, kept for the corner-proximity safeguard.
    pub vertices: Vec<LngLat>,
    pub edges: Vec<ZoneEdge>,
}

impl NoFlyZone {
    /// Validates a raw region and derives its edges.
    pub fn from_region(region: &NamedRegion) -> Result<NoFlyZone> {
        if region.vertices.len() < 2 {
            return Err(RoutingError::InvalidZone {
                name: region.name.clone(),
                reason: format!("expected at least 2 vertices, got {}", region.vertices.len()),
            });
        }
        if region.vertices.first() != region.vertices.last() {
            return Err(RoutingError::InvalidZone {
                name: region.name.clone(),
                reason: "vertex ring is not closed".to_string(),
            });
        }
        let edges = region
            .vertices
            .windows(2)
            .map(|pair| ZoneEdge::between(pair[0], pair[1]))
            .collect();
        Ok(NoFlyZone {
            name: region.name.clone(),
            vertices: region.vertices.clone(),
            edges,
        })
    }
}
