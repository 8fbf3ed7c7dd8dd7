//! Geospatial proximity engine for Placefinder.
//!
//! This crate provides:
//! - Haversine great-circle distance
//! - Category filtering over a place catalog
//! - Nearest-place and count-within-radius queries
//! - Distance ranking with optional parallelism
//! - Display formatting for distances
//! - WASM bindings for browser usage
//!
//! Every operation is a pure function of its inputs. Callers own the mutable
//! state (selected category, query point, radius) and re-run the engine on
//! each change.
//!
//! # Example
//!
//! ```
//! use placefinder_geo::{haversine_distance, Coordinate};
//!
//! let dublin = Coordinate::new(53.3498, -6.2603);
//! let galway = Coordinate::new(53.2707, -9.0568);
//!
//! let distance_km = haversine_distance(&dublin, &galway);
//! assert!((distance_km - 187.0).abs() < 5.0);
//! ```

mod catalog;
mod error;
mod filter;
mod format;
mod haversine;
mod proximity;
pub mod rank;

#[cfg(feature = "wasm")]
mod wasm;

pub use catalog::{category_color, Catalog, Place, PlaceCategory, CATEGORY_COLORS};
pub use error::{GeoError, GeoErrorCode, Result};
pub use filter::{filter_by_category, CategoryFilter, SHOW_ALL_ID};
pub use format::{format_distance, DisplayValue, NumberFormat, LESS_THAN_ONE};
pub use haversine::{
    haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M,
    MAX_DISTANCE_KM,
};
pub use proximity::{count_within_radius, nearest, Nearest, ProximityQuery, ProximityResult};
pub use rank::{rank_by_distance, within_radius, RankedPlace};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting values outside the valid degree ranges.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "latitude {latitude} / longitude {longitude} out of range"
            )))
        }
    }

    /// Returns true if the coordinate has valid values.
    ///
    /// NaN components are never valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(53.1424, -7.6921);
        assert_eq!(coord.latitude, 53.1424);
        assert_eq!(coord.longitude, -7.6921);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(Coordinate::try_new(53.0, -7.0).is_ok());

        let err = Coordinate::try_new(-95.0, 10.0).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (53.2707, -9.0568).into();
        assert_eq!(coord.latitude, 53.2707);
        assert_eq!(coord.longitude, -9.0568);
    }
}
