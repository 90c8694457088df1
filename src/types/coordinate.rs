//! Struct definition and implementations for [`LngLat`].

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A `LngLat` is a geographic position on the 2D longitude/latitude
/// plane the drone flies over.
///
/// Components are wrapped in [`OrderedFloat`] so positions can serve as
/// hash keys: two positions are the same place iff both components are
/// exactly equal, with no tolerance. Route reconstruction and the
/// search's visited bookkeeping rely on that exact identity; the fuzzy
/// "arrived yet?" question is a separate predicate
/// ([`is_close`](crate::utils::geometry::is_close)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: OrderedFloat<f64>,
    pub lat: OrderedFloat<f64>,
}

impl LngLat {
    /// Creates a position from plain float components.
    pub fn new(lng: f64, lat: f64) -> LngLat {
        LngLat {
            lng: OrderedFloat(lng),
            lat: OrderedFloat(lat),
        }
    }

    /// Longitude as a plain float.
    pub fn lng(&self) -> f64 {
        self.lng.into_inner()
    }

    /// Latitude as a plain float.
    pub fn lat(&self) -> f64 {
        self.lat.into_inner()
    }
}

#[cfg(test)]
mod coordinate_tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equality_is_exact() {
        let a = LngLat::new(-3.186874, 55.944494);
        let b = LngLat::new(-3.186874, 55.944494);
        let c = LngLat::new(-3.186874 + 1e-12, 55.944494);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_usable_as_hash_key() {
        let mut seen = HashMap::new();
        seen.insert(LngLat::new(0.0, 0.0), "origin");
        assert_eq!(seen.get(&LngLat::new(0.0, 0.0)), Some(&"origin"));
        assert_eq!(seen.get(&LngLat::new(0.0, 1.0)), None);
    }

    #[test]
    fn test_wire_shape() {
        let parsed: LngLat = serde_json::from_str(r#"{"lng":-3.19,"lat":55.94}"#).unwrap();
        assert_eq!(parsed, LngLat::new(-3.19, 55.94));
    }
}
