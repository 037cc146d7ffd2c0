#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Distance and centroid helpers for incident coordinates.
//!
//! Distances are great-circle distances on a sphere of radius
//! [`EARTH_RADIUS_KM`] (haversine). Centroids are planar averages of
//! latitude and longitude, which is only adequate for the small radii used
//! by hotspot clustering.

use crime_hotspot_incident_models::Coordinates;
use geo::{Centroid, MultiPoint, Point};
use thiserror::Error;

/// Sphere radius used for all distance computations, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Errors returned by [`distance_km`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// One of the two endpoints has no coordinates.
    #[error("Invalid input: {endpoint} coordinates are missing")]
    InvalidInput {
        /// Which endpoint was missing (`"first"` or `"second"`).
        endpoint: &'static str,
    },
}

/// Great-circle distance in kilometers between two optional coordinates.
///
/// # Errors
///
/// Returns [`DistanceError::InvalidInput`] if either endpoint is `None`.
pub fn distance_km(
    a: Option<&Coordinates>,
    b: Option<&Coordinates>,
) -> Result<f64, DistanceError> {
    let a = a.ok_or(DistanceError::InvalidInput { endpoint: "first" })?;
    let b = b.ok_or(DistanceError::InvalidInput { endpoint: "second" })?;
    Ok(haversine_km(a, b))
}

/// Great-circle distance in kilometers between two points (haversine).
#[must_use]
pub fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `h` a hair past 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Arithmetic mean of latitude and longitude over `points`.
///
/// Returns `None` for an empty input.
#[must_use]
pub fn planar_centroid<'a>(
    points: impl IntoIterator<Item = &'a Coordinates>,
) -> Option<Coordinates> {
    let multi: MultiPoint<f64> = points
        .into_iter()
        .map(|c| Point::new(c.longitude, c.latitude))
        .collect();

    multi
        .centroid()
        .map(|centroid| Coordinates::new(centroid.y(), centroid.x()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn sample_points() -> Vec<Coordinates> {
        vec![
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0005, 0.0005),
            Coordinates::new(38.8977, -77.0365),
            Coordinates::new(-33.8688, 151.2093),
            Coordinates::new(89.9, 179.9),
            Coordinates::new(-45.0, -179.5),
        ]
    }

    #[test]
    fn distance_to_self_is_zero() {
        for p in sample_points() {
            assert!(haversine_km(&p, &p).abs() < EPSILON, "{p:?}");
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let points = sample_points();
        for a in &points {
            for b in &points {
                let ab = haversine_km(a, b);
                let ba = haversine_km(b, a);
                assert!((ab - ba).abs() < EPSILON, "{a:?} <-> {b:?}: {ab} vs {ba}");
            }
        }
    }

    #[test]
    fn one_degree_of_longitude_on_equator() {
        let d = haversine_km(&Coordinates::new(0.0, 0.0), &Coordinates::new(0.0, 1.0));
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-6, "{d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_km(&Coordinates::new(0.0, 0.0), &Coordinates::new(0.0, 180.0));
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI;
        assert!((d - expected).abs() < 1e-6, "{d}");
    }

    #[test]
    fn nearby_points_are_well_under_a_kilometer() {
        let d = haversine_km(
            &Coordinates::new(0.0, 0.0),
            &Coordinates::new(0.0005, 0.0005),
        );
        assert!(d > 0.05 && d < 0.1, "{d}");
    }

    #[test]
    fn missing_coordinates_are_invalid_input() {
        let p = Coordinates::new(1.0, 1.0);
        assert_eq!(
            distance_km(None, Some(&p)),
            Err(DistanceError::InvalidInput { endpoint: "first" })
        );
        assert_eq!(
            distance_km(Some(&p), None),
            Err(DistanceError::InvalidInput { endpoint: "second" })
        );
        assert_eq!(distance_km(Some(&p), Some(&p)), Ok(0.0));
    }

    #[test]
    fn centroid_is_arithmetic_mean() {
        let points = [
            Coordinates::new(0.0, 0.0),
            Coordinates::new(0.0005, 0.0005),
            Coordinates::new(0.0006, 0.0004),
        ];
        let centroid = planar_centroid(&points).unwrap();
        assert!((centroid.latitude - 0.0011 / 3.0).abs() < EPSILON);
        assert!((centroid.longitude - 0.0009 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert_eq!(planar_centroid(&[] as &[Coordinates]), None);
    }
}
