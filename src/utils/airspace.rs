//! Shared, read-only airspace configuration and the containment
//! predicates over it.
//!
//! An [`Airspace`] is built once from external input and then passed by
//! reference into the route finder; nothing here mutates after
//! construction, so any number of route-finder invocations may share one
//! instance.

use log::info;

use crate::types::coordinate::LngLat;
use crate::types::error::Result;
use crate::types::region::{CentralRegion, NamedRegion, NoFlyZone, Slope, ZoneEdge};
use crate::utils::geometry::{self, MOVE_DISTANCE};

/// A position within this distance of any zone vertex is treated as
/// inside the zone, so a fixed-length step cannot jump a thin corner the
/// crossing parity would miss. Must not exceed 0.8 of the move distance.
const CORNER_MARGIN: f64 = MOVE_DISTANCE * 0.8;

/// The airspace picture the drone flies in: the central region and the
/// preprocessed no-fly zones.
#[derive(Debug, Clone)]
pub struct Airspace {
    pub central_region: CentralRegion,
    pub no_fly_zones: Vec<NoFlyZone>,
}

impl Airspace {
    /// Validates the raw regions and preprocesses every no-fly zone into
    /// its edge list. Malformed input surfaces here, never during a
    /// search.
    pub fn new(central: &NamedRegion, no_fly: &[NamedRegion]) -> Result<Airspace> {
        let central_region = CentralRegion::from_region(central)?;
        let no_fly_zones = no_fly
            .iter()
            .map(NoFlyZone::from_region)
            .collect::<Result<Vec<_>>>()?;
        info!(
            "airspace ready: central region {:?}, {} no-fly zones",
            central_region.name,
            no_fly_zones.len()
        );
        Ok(Airspace {
            central_region,
            no_fly_zones,
        })
    }

    /// Whether `position` is inside the central region, boundary
    /// included.
    pub fn is_in_central_region(&self, position: LngLat) -> bool {
        is_in_region(position, &self.central_region)
    }

    /// Whether `position` is inside any no-fly zone.
    pub fn is_in_no_fly_zone(&self, position: LngLat) -> bool {
        self.no_fly_zones.iter().any(|zone| inside_zone(position, zone))
    }
}

/// Closed-rectangle containment test against the conventional corners.
///
/// Only valid for the axis-aligned central region; no-fly zones go
/// through the crossing parity test instead.
pub fn is_in_region(position: LngLat, region: &CentralRegion) -> bool {
    position.lng() >= region.top_left.lng()
        && position.lng() <= region.top_right.lng()
        && position.lat() >= region.bottom_left.lat()
        && position.lat() <= region.top_left.lat()
}

fn inside_zone(position: LngLat, zone: &NoFlyZone) -> bool {
    if crossing_count(position, zone) % 2 != 0 {
        return true;
    }
    zone.vertices
        .iter()
        .any(|vertex| geometry::distance(position, *vertex) < CORNER_MARGIN)
}

/// Number of zone edges a rightward ray from `position` crosses.
fn crossing_count(position: LngLat, zone: &NoFlyZone) -> usize {
    zone.edges
        .iter()
        .filter(|edge| crosses(position, edge))
        .count()
}

fn crosses(position: LngLat, edge: &ZoneEdge) -> bool {
    // A horizontal edge counts only when the position lies on it.
    if position.lat() == edge.lower.lat() && position.lat() == edge.upper.lat() {
        return position.lng() >= edge.min_lng() && position.lng() <= edge.max_lng();
    }

    // Strict latitude bounds: a position level with a shared endpoint of
    // two slanted edges must not count a crossing for both.
    if position.lat() > edge.lower.lat()
        && position.lat() < edge.upper.lat()
        && position.lng() <= edge.max_lng()
    {
        // Casting to the right: compare the edge's slope with the slope
        // of the line from the edge's lower end to the position.
        let line = Slope::between(edge.lower, position);
        return match (edge.slope, line) {
            // The position is on the left of a vertical edge.
            (Slope::Vertical, Slope::Finite(line)) => line < 0.0,
            // The position sits directly above the lower end of a
            // slanted edge; only a rising edge passes to its right.
            (Slope::Finite(slope), Slope::Vertical) => slope > 0.0,
            // The position lies on the vertical edge's line.
            (Slope::Vertical, Slope::Vertical) => true,
            (Slope::Finite(slope), Slope::Finite(line)) => {
                line >= slope || (line < 0.0 && slope > 0.0)
            }
        };
    }

    false
}

#[cfg(test)]
mod airspace_tests {
    use super::*;

    fn central() -> NamedRegion {
        // Ring order: top-left, top-right, bottom-right, bottom-left.
        NamedRegion::new(
            "central",
            vec![
                LngLat::new(-2.0, 2.0),
                LngLat::new(2.0, 2.0),
                LngLat::new(2.0, -2.0),
                LngLat::new(-2.0, -2.0),
            ],
        )
    }

    fn unit_square_zone() -> NamedRegion {
        NamedRegion::new(
            "square",
            vec![
                LngLat::new(0.0, 0.0),
                LngLat::new(1.0, 0.0),
                LngLat::new(1.0, 1.0),
                LngLat::new(0.0, 1.0),
                LngLat::new(0.0, 0.0),
            ],
        )
    }

    fn airspace_with(zones: Vec<NamedRegion>) -> Airspace {
        Airspace::new(&central(), &zones).unwrap()
    }

    #[test]
    fn test_rectangle_containment_is_closed() {
        let airspace = airspace_with(vec![]);
        // Interior and all four boundary edges.
        assert!(airspace.is_in_central_region(LngLat::new(0.0, 0.0)));
        assert!(airspace.is_in_central_region(LngLat::new(-2.0, 0.0)));
        assert!(airspace.is_in_central_region(LngLat::new(2.0, 0.0)));
        assert!(airspace.is_in_central_region(LngLat::new(0.0, 2.0)));
        assert!(airspace.is_in_central_region(LngLat::new(0.0, -2.0)));
        // One unit beyond each edge.
        assert!(!airspace.is_in_central_region(LngLat::new(-3.0, 0.0)));
        assert!(!airspace.is_in_central_region(LngLat::new(3.0, 0.0)));
        assert!(!airspace.is_in_central_region(LngLat::new(0.0, 3.0)));
        assert!(!airspace.is_in_central_region(LngLat::new(0.0, -3.0)));
    }

    #[test]
    fn test_point_far_outside_zone() {
        let airspace = airspace_with(vec![unit_square_zone()]);
        assert!(!airspace.is_in_no_fly_zone(LngLat::new(5.0, 5.0)));
    }

    #[test]
    fn test_point_strictly_inside_zone() {
        let airspace = airspace_with(vec![unit_square_zone()]);
        assert!(airspace.is_in_no_fly_zone(LngLat::new(0.5, 0.5)));
    }

    #[test]
    fn test_point_left_of_zone_crosses_twice() {
        let airspace = airspace_with(vec![unit_square_zone()]);
        assert!(!airspace.is_in_no_fly_zone(LngLat::new(-1.0, 0.5)));
    }

    #[test]
    fn test_point_on_horizontal_edge_counts_as_inside() {
        let airspace = airspace_with(vec![unit_square_zone()]);
        assert!(airspace.is_in_no_fly_zone(LngLat::new(0.5, 0.0)));
        assert!(airspace.is_in_no_fly_zone(LngLat::new(0.5, 1.0)));
    }

    /// A diamond has no horizontal edges, so parity alone reports its
    /// apex as outside; the corner safeguard must still claim it.
    #[test]
    fn test_zone_vertex_caught_by_corner_safeguard() {
        let diamond = NamedRegion::new(
            "diamond",
            vec![
                LngLat::new(0.0, 0.0),
                LngLat::new(1.0, 1.0),
                LngLat::new(2.0, 0.0),
                LngLat::new(1.0, -1.0),
                LngLat::new(0.0, 0.0),
            ],
        );
        let airspace = airspace_with(vec![diamond]);
        assert!(airspace.is_in_no_fly_zone(LngLat::new(1.0, 1.0)));
        // Just shy of the apex, within the corner margin.
        assert!(airspace.is_in_no_fly_zone(LngLat::new(1.0, 1.0 + CORNER_MARGIN * 0.5)));
        // Well clear of the margin.
        assert!(!airspace.is_in_no_fly_zone(LngLat::new(1.0, 1.0 + CORNER_MARGIN * 2.0)));
    }

    #[test]
    fn test_first_matching_zone_wins() {
        let far_zone = NamedRegion::new(
            "far",
            vec![
                LngLat::new(10.0, 10.0),
                LngLat::new(11.0, 10.0),
                LngLat::new(11.0, 11.0),
                LngLat::new(10.0, 11.0),
                LngLat::new(10.0, 10.0),
            ],
        );
        let airspace = airspace_with(vec![far_zone, unit_square_zone()]);
        assert!(airspace.is_in_no_fly_zone(LngLat::new(0.5, 0.5)));
        assert!(airspace.is_in_no_fly_zone(LngLat::new(10.5, 10.5)));
        assert!(!airspace.is_in_no_fly_zone(LngLat::new(5.0, 5.0)));
    }

    #[test]
    fn test_malformed_zone_is_rejected_at_construction() {
        let unclosed = NamedRegion::new(
            "unclosed",
            vec![
                LngLat::new(0.0, 0.0),
                LngLat::new(1.0, 0.0),
                LngLat::new(1.0, 1.0),
            ],
        );
        assert!(Airspace::new(&central(), &[unclosed]).is_err());
    }
}
