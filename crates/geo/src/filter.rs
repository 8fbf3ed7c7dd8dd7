//! Category filtering.

use crate::Place;
use serde::{Deserialize, Serialize};

/// Category id the feed and UI use to mean "show all".
pub const SHOW_ALL_ID: i64 = -1;

/// Which places a query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum CategoryFilter {
    /// Every place in the catalog
    #[default]
    All,
    /// Only places in the given category
    Category(i64),
}

impl CategoryFilter {
    /// Returns true if the place passes this filter.
    #[inline]
    pub fn matches(&self, place: &Place) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => place.category_id == *id,
        }
    }
}

impl From<i64> for CategoryFilter {
    fn from(id: i64) -> Self {
        if id == SHOW_ALL_ID {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(id)
        }
    }
}

impl From<CategoryFilter> for i64 {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => SHOW_ALL_ID,
            CategoryFilter::Category(id) => id,
        }
    }
}

impl From<Option<i64>> for CategoryFilter {
    fn from(id: Option<i64>) -> Self {
        id.map_or(CategoryFilter::All, CategoryFilter::from)
    }
}

/// Narrows places to those matching `filter`, preserving input order.
///
/// With [`CategoryFilter::All`] every element is returned in order.
pub fn filter_by_category(places: &[Place], filter: CategoryFilter) -> Vec<&Place> {
    places.iter().filter(|place| filter.matches(place)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places() -> Vec<Place> {
        vec![
            Place::new(1, "Blarney Castle", 3, 51.9291, -8.5709),
            Place::new(2, "Glendalough", 7, 53.0106, -6.3298),
            Place::new(3, "Trim Castle", 3, 53.5547, -6.7903),
            Place::new(4, "Muckross Abbey", 7, 52.0283, -9.5047),
        ]
    }

    #[test]
    fn test_show_all_preserves_identity_and_order() {
        let places = places();
        let filtered = filter_by_category(&places, CategoryFilter::All);

        assert_eq!(filtered.len(), places.len());
        for (kept, original) in filtered.iter().zip(places.iter()) {
            assert!(std::ptr::eq(*kept, original));
        }
    }

    #[test]
    fn test_filter_by_category_keeps_relative_order() {
        let places = places();
        let castles = filter_by_category(&places, CategoryFilter::Category(3));
        let ids: Vec<i64> = castles.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let places = places();
        assert!(filter_by_category(&places, CategoryFilter::Category(99)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_by_category(&[], CategoryFilter::All).is_empty());
        assert!(filter_by_category(&[], CategoryFilter::Category(3)).is_empty());
    }

    #[test]
    fn test_sentinel_conversion() {
        assert_eq!(CategoryFilter::from(SHOW_ALL_ID), CategoryFilter::All);
        assert_eq!(CategoryFilter::from(4), CategoryFilter::Category(4));
        assert_eq!(CategoryFilter::from(None), CategoryFilter::All);
        assert_eq!(i64::from(CategoryFilter::All), SHOW_ALL_ID);

        let filter: CategoryFilter = serde_json::from_str("-1").unwrap();
        assert_eq!(filter, CategoryFilter::All);
        assert_eq!(serde_json::to_string(&CategoryFilter::Category(5)).unwrap(), "5");
    }
}
