//! Pure movement geometry over [`LngLat`] positions.

use crate::types::coordinate::LngLat;

/// Length of a single drone move, in degrees.
pub const MOVE_DISTANCE: f64 = 1.5e-4;

/// Two positions closer than this count as the same place for arrival
/// purposes. The comparison is strictly less-than.
pub const CLOSE_DISTANCE: f64 = 1.5e-4;

/// Number of fixed compass headings available to a move.
pub const HEADING_COUNT: usize = 16;

/// Angular spacing of the heading menu, in degrees.
pub const HEADING_STEP_DEGREES: f64 = 22.5;

/// Euclidean distance between two positions. The operating area is small
/// enough that no great-circle correction is applied.
pub fn distance(from: LngLat, to: LngLat) -> f64 {
    ((to.lng() - from.lng()).powi(2) + (to.lat() - from.lat()).powi(2)).sqrt()
}

/// Whether `position` is in strict proximity of `other`.
pub fn is_close(position: LngLat, other: LngLat) -> bool {
    distance(position, other) < CLOSE_DISTANCE
}

/// The position reached by one fixed-length move along `angle_degrees`,
/// following the standard trigonometric convention: cosine on the
/// longitude axis, sine on the latitude axis.
pub fn next_position(position: LngLat, angle_degrees: f64) -> LngLat {
    let radians = angle_degrees.to_radians();
    LngLat::new(
        radians.cos() * MOVE_DISTANCE + position.lng(),
        radians.sin() * MOVE_DISTANCE + position.lat(),
    )
}

/// The 16 compass headings a move may take, ascending from 0°.
pub fn compass_headings() -> impl Iterator<Item = f64> {
    (0..HEADING_COUNT).map(|step| step as f64 * HEADING_STEP_DEGREES)
}
