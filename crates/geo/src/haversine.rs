//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Largest possible great-circle distance (antipodal points), in kilometers.
pub const MAX_DISTANCE_KM: f64 = std::f64::consts::PI * EARTH_RADIUS_KM;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Coincident points yield exactly `0.0`, the result is symmetric in its
/// arguments and never exceeds [`MAX_DISTANCE_KM`].
///
/// # Example
/// ```
/// use placefinder_geo::{haversine_distance, Coordinate};
///
/// let dublin = Coordinate::new(53.3498, -6.2603);
/// let cork = Coordinate::new(51.8985, -8.4756);
///
/// let distance = haversine_distance(&dublin, &cork);
/// assert!((distance - 220.0).abs() < 5.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1.0 near antipodes, where asin is NaN.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    radius * c
}
