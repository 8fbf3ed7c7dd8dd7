//! Distance ranking with optional parallelism.
//!
//! Distances are computed in parallel when the `parallel` feature is on; the
//! ordering step is a stable sort, so places at equal distance keep their
//! input order either way.

use crate::{haversine_distance, Coordinate, Place};
use serde::Serialize;

/// A place paired with its distance from a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedPlace<'a> {
    /// The place
    pub place: &'a Place,
    /// Distance from the query point in kilometers
    pub distance_km: f64,
}

/// Computes the distance from `query` to every place, in input order.
pub fn calculate_distances<'a>(places: &[&'a Place], query: &Coordinate) -> Vec<RankedPlace<'a>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        places
            .par_iter()
            .map(|&place| rank_single(query, place))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        places.iter().map(|&place| rank_single(query, place)).collect()
    }
}

/// Orders places by ascending distance from `query`.
///
/// # Arguments
/// * `places` - Places to rank, typically a filtered catalog
/// * `query` - The query point
/// * `limit` - Maximum number of results to return (None for all)
///
/// # Example
/// ```
/// use placefinder_geo::{rank_by_distance, Coordinate, Place};
///
/// let places = vec![
///     Place::new(1, "Galway", 1, 53.2707, -9.0568),
///     Place::new(2, "Dublin", 1, 53.3498, -6.2603),
/// ];
/// let refs: Vec<&Place> = places.iter().collect();
///
/// let ranked = rank_by_distance(&refs, &Coordinate::new(53.35, -6.3), None);
/// assert_eq!(ranked[0].place.id, 2);
/// ```
pub fn rank_by_distance<'a>(
    places: &[&'a Place],
    query: &Coordinate,
    limit: Option<usize>,
) -> Vec<RankedPlace<'a>> {
    let mut results = calculate_distances(places, query);

    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    if let Some(max) = limit {
        results.truncate(max);
    }

    results
}

/// Ranked places within `radius_km` of `query`, boundary inclusive.
pub fn within_radius<'a>(
    places: &[&'a Place],
    query: &Coordinate,
    radius_km: f64,
) -> Vec<RankedPlace<'a>> {
    let mut results = calculate_distances(places, query);

    results.retain(|r| r.distance_km <= radius_km);
    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    results
}

#[inline]
fn rank_single<'a>(query: &Coordinate, place: &'a Place) -> RankedPlace<'a> {
    RankedPlace {
        place,
        distance_km: haversine_distance(query, &place.coordinate()),
    }
}
