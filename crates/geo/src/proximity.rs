//! Nearest-place and radius queries.
//!
//! Both queries accept any iterator of place references so they work on a
//! full catalog slice (`catalog.places()`) as well as on the output of
//! [`filter_by_category`](crate::filter_by_category).

use crate::{
    filter_by_category, haversine_distance, Catalog, CategoryFilter, Coordinate, GeoError, Place, Result,
};
use serde::Serialize;

/// The closest place to a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nearest<'a> {
    /// The closest place
    pub place: &'a Place,
    /// Distance from the query point in kilometers
    pub distance_km: f64,
}

/// Finds the place closest to `query`.
///
/// When several places share the exact minimum distance, the first one in
/// input order wins. Returns `None` for an empty input.
pub fn nearest<'a, I>(places: I, query: &Coordinate) -> Option<Nearest<'a>>
where
    I: IntoIterator<Item = &'a Place>,
{
    places.into_iter().fold(None, |best: Option<Nearest<'a>>, place| {
        let distance_km = haversine_distance(query, &place.coordinate());
        match best {
            Some(current) if !distance_km.total_cmp(&current.distance_km).is_lt() => Some(current),
            _ => Some(Nearest { place, distance_km }),
        }
    })
}

/// Counts places within `radius_km` of `query`, boundary inclusive.
pub fn count_within_radius<'a, I>(places: I, query: &Coordinate, radius_km: f64) -> usize
where
    I: IntoIterator<Item = &'a Place>,
{
    places
        .into_iter()
        .filter(|place| haversine_distance(query, &place.coordinate()) <= radius_km)
        .count()
}

/// One consistent snapshot of the caller's query state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProximityQuery {
    /// Category selection
    pub filter: CategoryFilter,
    /// User-placed query point
    pub point: Coordinate,
    /// Radius for the count, in kilometers
    pub radius_km: f64,
}

impl ProximityQuery {
    /// Creates a query snapshot.
    pub fn new(filter: impl Into<CategoryFilter>, point: Coordinate, radius_km: f64) -> Self {
        Self {
            filter: filter.into(),
            point,
            radius_km,
        }
    }

    /// Creates a query snapshot, rejecting a negative or NaN radius.
    pub fn try_new(filter: impl Into<CategoryFilter>, point: Coordinate, radius_km: f64) -> Result<Self> {
        if radius_km.is_nan() || radius_km < 0.0 {
            return Err(GeoError::InvalidRadius(format!("{radius_km} km")));
        }
        Ok(Self::new(filter, point, radius_km))
    }

    /// Runs the query against a catalog.
    pub fn evaluate<'a>(&self, catalog: &'a Catalog) -> ProximityResult<'a> {
        self.evaluate_places(catalog.places())
    }

    /// Runs the query against a place slice.
    ///
    /// The filter is applied once and both the nearest place and the radius
    /// count are derived from that same filtered set.
    pub fn evaluate_places<'a>(&self, places: &'a [Place]) -> ProximityResult<'a> {
        let filtered = filter_by_category(places, self.filter);
        let closest = nearest(filtered.iter().copied(), &self.point);
        let count = count_within_radius(filtered.iter().copied(), &self.point, self.radius_km);

        ProximityResult {
            nearest_place: closest.map(|n| n.place),
            distance_km: closest.map(|n| n.distance_km),
            count_within_radius: count,
        }
    }
}

/// Summary of a proximity query.
///
/// `nearest_place` and `distance_km` are both present or both absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProximityResult<'a> {
    /// Closest place, absent when the filtered set is empty
    pub nearest_place: Option<&'a Place>,
    /// Distance to the closest place in kilometers
    pub distance_km: Option<f64>,
    /// Number of filtered places within the radius
    pub count_within_radius: usize,
}

impl ProximityResult<'_> {
    /// True when the filtered set had no places.
    pub fn is_empty(&self) -> bool {
        self.nearest_place.is_none()
    }
}
