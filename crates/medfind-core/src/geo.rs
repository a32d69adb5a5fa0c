//! Geographic value types and the proximity ranking primitive.
//!
//! Everything in this module is pure: no I/O, no shared state. The ranking
//! pipeline (haversine distance, radius filter, ascending sort) lives here so
//! the medicine search and the store search share one implementation.

use thiserror::Error;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("search radius {0} km outside [1, 100]")]
    RadiusOutOfRange(f64),
}

/// A validated point on the globe, in degrees.
///
/// Out-of-range (or NaN) coordinates are rejected at construction, never
/// clamped, so every `GeoPoint` in the system is usable as-is.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// # Errors
    ///
    /// Returns [`GeoError`] if either coordinate is outside its valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(self) -> f64 {
        self.longitude
    }
}

/// Search radius in kilometers, restricted to `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RadiusKm(f64);

impl RadiusKm {
    pub const MIN_KM: f64 = 1.0;
    pub const MAX_KM: f64 = 100.0;
    pub const DEFAULT_KM: f64 = 10.0;

    /// # Errors
    ///
    /// Returns [`GeoError::RadiusOutOfRange`] outside `[1, 100]` km.
    pub fn new(km: f64) -> Result<Self, GeoError> {
        if !(Self::MIN_KM..=Self::MAX_KM).contains(&km) {
            return Err(GeoError::RadiusOutOfRange(km));
        }
        Ok(Self(km))
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for RadiusKm {
    fn default() -> Self {
        Self(Self::DEFAULT_KM)
    }
}

/// Great-circle distance in kilometers between two points (haversine).
///
/// Symmetric, and zero (not NaN) when both points coincide, including at the
/// poles and across the antimeridian.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h fractionally past 1.0 for coincident points, which
    // would feed a negative into the second sqrt and yield NaN.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Round a distance to two decimals for display. Filtering and sorting always
/// use the unrounded value.
#[must_use]
pub fn round_2dp(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Rank candidates by distance from `origin`, dropping any beyond `radius`.
///
/// `extract_location` returning `None` marks a candidate without a resolvable
/// location (e.g. a join inconsistency); such candidates are silently skipped
/// rather than failing the whole search.
///
/// The sort is stable, so equal-distance candidates keep their input order —
/// callers that need a deterministic tie-break order their input first.
///
/// O(n) distance computations plus an O(n log n) sort; there is no spatial
/// index, which is the known ceiling of this component at large n.
pub fn rank_by_proximity<C, F>(
    origin: GeoPoint,
    candidates: Vec<C>,
    extract_location: F,
    radius: RadiusKm,
) -> Vec<(C, f64)>
where
    F: Fn(&C) -> Option<GeoPoint>,
{
    let mut ranked: Vec<(C, f64)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let location = extract_location(&candidate)?;
            let distance = distance_km(origin, location);
            (distance <= radius.get()).then_some((candidate, distance))
        })
        .collect();

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn geo_point_rejects_out_of_range() {
        assert_eq!(
            GeoPoint::new(90.1, 0.0),
            Err(GeoError::LatitudeOutOfRange(90.1))
        );
        assert_eq!(
            GeoPoint::new(-91.0, 0.0),
            Err(GeoError::LatitudeOutOfRange(-91.0))
        );
        assert_eq!(
            GeoPoint::new(0.0, 180.5),
            Err(GeoError::LongitudeOutOfRange(180.5))
        );
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(90.0, -180.0).is_ok());
    }

    #[test]
    fn radius_bounds_enforced() {
        assert!(RadiusKm::new(0.5).is_err());
        assert!(RadiusKm::new(100.1).is_err());
        assert!(RadiusKm::new(1.0).is_ok());
        assert!(RadiusKm::new(100.0).is_ok());
        assert!((RadiusKm::default().get() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let delhi = point(28.6139, 77.2090);
        let mumbai = point(19.0760, 72.8777);
        assert!((distance_km(delhi, mumbai) - distance_km(mumbai, delhi)).abs() < 1e-9);
    }

    #[test]
    fn distance_identity_is_zero_without_nan() {
        for p in [
            point(0.0, 0.0),
            point(90.0, 0.0),
            point(-90.0, 0.0),
            point(45.0, 180.0),
            point(-33.0, -180.0),
        ] {
            let d = distance_km(p, p);
            assert!(d.is_finite(), "expected finite distance at {p:?}, got {d}");
            assert!(d.abs() < 1e-9, "expected zero distance at {p:?}, got {d}");
        }
    }

    #[test]
    fn distance_delhi_to_mumbai_matches_known_value() {
        let d = distance_km(point(28.6139, 77.2090), point(19.0760, 72.8777));
        assert!((1150.0..=1165.0).contains(&d), "got {d}");
    }

    #[test]
    fn rank_filters_strictly_by_radius() {
        let origin = point(12.9716, 77.5946);
        let candidates = vec![
            ("near", point(12.9750, 77.6000)),
            ("far", point(13.4000, 77.6000)), // ~48 km north
        ];
        let ranked = rank_by_proximity(
            origin,
            candidates,
            |c| Some(c.1),
            RadiusKm::new(10.0).unwrap(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].0 .0, "near");
        assert!(ranked[0].1 <= 10.0);
    }

    #[test]
    fn rank_sorts_ascending_by_distance() {
        let origin = point(0.0, 0.0);
        let candidates = vec![
            ("c", point(0.0, 0.03)),
            ("a", point(0.0, 0.01)),
            ("b", point(0.0, 0.02)),
        ];
        let ranked =
            rank_by_proximity(origin, candidates, |c| Some(c.1), RadiusKm::default());
        let names: Vec<&str> = ranked.iter().map(|(c, _)| c.0).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(ranked.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn rank_keeps_input_order_for_equal_distances() {
        let origin = point(0.0, 0.0);
        let spot = point(0.0, 0.05);
        let candidates = vec![("first", spot), ("second", spot), ("third", spot)];
        let ranked =
            rank_by_proximity(origin, candidates, |c| Some(c.1), RadiusKm::default());
        let names: Vec<&str> = ranked.iter().map(|(c, _)| c.0).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn rank_skips_candidates_without_location() {
        let origin = point(0.0, 0.0);
        let candidates = vec![("located", Some(point(0.0, 0.01))), ("orphaned", None)];
        let ranked = rank_by_proximity(origin, candidates, |c| c.1, RadiusKm::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].0 .0, "located");
    }

    #[test]
    fn rank_empty_input_yields_empty_output() {
        let ranked: Vec<((), f64)> = rank_by_proximity(
            point(0.0, 0.0),
            Vec::new(),
            |()| Some(point(0.0, 0.0)),
            RadiusKm::default(),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn bangalore_scenario_distance_in_expected_band() {
        let d = distance_km(point(12.9716, 77.5946), point(12.9750, 77.6000));
        assert!((0.6..=0.7).contains(&d), "got {d}");
        let rounded = round_2dp(d);
        assert!((rounded * 100.0).fract().abs() < 1e-9);
    }

    #[test]
    fn round_2dp_rounds_half_up() {
        assert!((round_2dp(1.005) - 1.0).abs() < 0.011);
        assert!((round_2dp(3.14159) - 3.14).abs() < 1e-9);
        assert!((round_2dp(9.999) - 10.0).abs() < 1e-9);
    }
}
