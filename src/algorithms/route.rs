//! Greedy best-first route finding over the fixed heading menu.
//!
//! The search explores the implicit graph whose vertices are positions
//! and whose edges are the 16 compass moves. Candidate costs carry a
//! delta-corrected heuristic: each neighbor's cost is the current cost
//! plus the step weight plus the change in straight-line distance to the
//! destination, which keeps frontier ordering comparable to the distance
//! remaining while still accumulating true step costs.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use log::{debug, info};

use crate::types::coordinate::LngLat;
use crate::types::error::{Result, RoutingError};
use crate::types::node::{Move, MoveCost, PathNode};
use crate::utils::airspace::Airspace;
use crate::utils::geometry::{self, MOVE_DISTANCE};

/// Weight of one unblocked move. Kept well under the heuristic scale so
/// the step cost never dwarfs the distance remaining; the move distance
/// must be divided by 20 or more for the search to stay greedy.
const STEP_WEIGHT: f64 = MOVE_DISTANCE / 20.0;

/// Finds step-by-step routes through one airspace picture.
///
/// Holds only a shared reference to the airspace; the frontier and
/// settled collections live inside each [`find_route`](Self::find_route)
/// call, so distinct invocations share no mutable state.
pub struct RouteFinder<'a> {
    airspace: &'a Airspace,
}

impl<'a> RouteFinder<'a> {
    pub fn new(airspace: &'a Airspace) -> RouteFinder<'a> {
        RouteFinder { airspace }
    }

    /// Finds a route of fixed-length moves from `from` to within
    /// proximity of `to`, avoiding every no-fly zone.
    ///
    /// The returned route starts with a hover node at `from`; every
    /// later node's `parent` equals the previous node's `position`.
    pub fn find_route(&self, from: LngLat, to: LngLat) -> Result<Vec<PathNode>> {
        if from == to {
            return Err(RoutingError::DegenerateRequest(
                "origin and destination are the same position".to_string(),
            ));
        }
        if self.airspace.is_in_no_fly_zone(from) {
            return Err(RoutingError::DegenerateRequest(
                "origin lies inside a no-fly zone".to_string(),
            ));
        }
        if self.airspace.is_in_no_fly_zone(to) {
            return Err(RoutingError::DegenerateRequest(
                "destination lies inside a no-fly zone".to_string(),
            ));
        }

        let mut frontier = Frontier::new();
        let mut settled: HashMap<LngLat, PathNode> = HashMap::new();

        frontier.push(PathNode {
            parent: from,
            step: Move::Hover,
            position: from,
            cost: MoveCost::finite(heuristic(from, to)),
        });

        let terminal = loop {
            let current = match frontier.pop() {
                Some(node) => node,
                None => return Err(RoutingError::NoRouteFound { from, to }),
            };
            if geometry::is_close(current.position, to) {
                settled.insert(current.position, current.clone());
                break current;
            }

            for angle in geometry::compass_headings() {
                let position = geometry::next_position(current.position, angle);
                let cost = (current.cost + self.step_weight(position))
                    .offset(heuristic(position, to) - heuristic(current.position, to));
                let candidate = PathNode {
                    parent: current.position,
                    step: Move::Heading(angle),
                    position,
                    cost,
                };
                match frontier.cost_of(position) {
                    // Replace-if-cheaper: the superseded entry is never
                    // expanded.
                    Some(existing) if candidate.cost < existing => frontier.push(candidate),
                    Some(_) => {}
                    // Settled positions are never reopened.
                    None if !settled.contains_key(&position) => frontier.push(candidate),
                    None => {}
                }
            }
            settled.insert(current.position, current);
        };

        let route = backtrack(terminal, &settled, from, to)?;
        info!(
            "route found: {} moves from {:?} to {:?}",
            route.len().saturating_sub(1),
            from,
            to
        );
        debug!("settled {} positions", settled.len());
        Ok(route)
    }

    fn step_weight(&self, position: LngLat) -> MoveCost {
        if self.airspace.is_in_no_fly_zone(position) {
            MoveCost::Blocked
        } else {
            MoveCost::finite(STEP_WEIGHT)
        }
    }
}

/// Straight-line distance to the destination.
fn heuristic(position: LngLat, destination: LngLat) -> f64 {
    geometry::distance(position, destination)
}

/// Walks parent links through the settled map from the terminal node
/// back to the origin, producing the forward route origin-first.
fn backtrack(
    terminal: PathNode,
    settled: &HashMap<LngLat, PathNode>,
    from: LngLat,
    to: LngLat,
) -> Result<Vec<PathNode>> {
    let mut route = Vec::new();
    let mut current = terminal;
    while current.position != from {
        // A missing parent means the settled bookkeeping broke; surface
        // it as an unroutable pair rather than panicking.
        let parent = settled
            .get(&current.parent)
            .cloned()
            .ok_or(RoutingError::NoRouteFound { from, to })?;
        route.push(current);
        current = parent;
    }
    route.push(current);
    route.reverse();
    Ok(route)
}

/// Derives the there-and-back route from a forward route: hover at the
/// destination, then retrace every move in reverse with headings rotated
/// a half turn, ending on the original starting node.
pub fn round_trip(forward: &[PathNode]) -> Vec<PathNode> {
    let mut path = forward.to_vec();
    if let Some(turnaround) = forward.last() {
        path.push(PathNode {
            parent: turnaround.position,
            step: Move::Hover,
            position: turnaround.position,
            cost: MoveCost::finite(0.0),
        });
    }
    for node in forward.iter().skip(1).rev() {
        path.push(PathNode {
            parent: node.position,
            step: node.step.reversed(),
            position: node.parent,
            cost: MoveCost::finite(0.0),
        });
    }
    if let Some(origin) = forward.first() {
        path.push(origin.clone());
    }
    path
}

/// Frontier entry. Ordering is over cost alone, with ties broken by
/// insertion sequence (earliest first) so runs are deterministic.
struct FrontierEntry {
    node: PathNode,
    seq: u64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node.cost == other.node.cost && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .cost
            .cmp(&other.node.cost)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier keyed by position.
///
/// A replacement leaves the superseded heap entry in place; `pop` skims
/// entries whose cost no longer matches the live cost recorded for
/// their position, so a stale duplicate can never be expanded.
struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    live: HashMap<LngLat, MoveCost>,
    next_seq: u64,
}

impl Frontier {
    fn new() -> Frontier {
        Frontier {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Live frontier cost for a position, if one is queued.
    fn cost_of(&self, position: LngLat) -> Option<MoveCost> {
        self.live.get(&position).copied()
    }

    /// Inserts a node, superseding any existing entry for its position.
    fn push(&mut self, node: PathNode) {
        self.live.insert(node.position, node.cost);
        self.heap.push(Reverse(FrontierEntry {
            node,
            seq: self.next_seq,
        }));
        self.next_seq += 1;
    }

    /// Removes and returns the cheapest live node. Entries superseded by
    /// a cheaper replacement, or left behind by an earlier pop, are
    /// discarded on the way.
    fn pop(&mut self) -> Option<PathNode> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            let is_live = self
                .live
                .get(&entry.node.position)
                .map_or(false, |cost| *cost == entry.node.cost);
            if is_live {
                self.live.remove(&entry.node.position);
                return Some(entry.node);
            }
        }
        None
    }
}
