//! Place catalog types.
//!
//! JSON field names follow the upstream feed: places carry `place_type_id`
//! and an optional `gaelic_name`; categories are plain `{id, name}` objects.

use crate::{Coordinate, Result};
use serde::{Deserialize, Serialize};

/// Display colors keyed by category id.
pub const CATEGORY_COLORS: &[(i64, &str)] = &[
    (1, "tomato"),
    (2, "orange"),
    (3, "yellow"),
    (4, "aqua"),
    (5, "wheat"),
    (6, "blue"),
    (7, "linen"),
    (8, "green"),
    (9, "tan"),
    (10, "gold"),
    (11, "violet"),
    (12, "indigo"),
    (13, "navy"),
    (14, "plum"),
    (15, "teal"),
];

/// Returns the display color for a category id, if one is assigned.
pub fn category_color(category_id: i64) -> Option<&'static str> {
    CATEGORY_COLORS
        .iter()
        .find(|(id, _)| *id == category_id)
        .map(|(_, color)| *color)
}

/// A point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique place id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Secondary (Irish language) name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaelic_name: Option<String>,
    /// Id of the [`PlaceCategory`] this place belongs to
    #[serde(rename = "place_type_id")]
    pub category_id: i64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Free-text location description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Place {
    /// Creates a place with only the fields the engine needs.
    pub fn new(id: i64, name: impl Into<String>, category_id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            gaelic_name: None,
            category_id,
            latitude,
            longitude,
            location: None,
        }
    }

    /// The place's position.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A category places can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceCategory {
    /// Unique category id
    pub id: i64,
    /// Display name
    pub name: String,
}

impl PlaceCategory {
    /// Creates a category.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Display color for this category.
    pub fn color(&self) -> Option<&'static str> {
        category_color(self.id)
    }
}

/// The full, unfiltered set of places and categories for one session.
///
/// Built once and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    places: Vec<Place>,
    categories: Vec<PlaceCategory>,
}

impl Catalog {
    /// Creates a catalog from already-loaded collections.
    pub fn new(places: Vec<Place>, categories: Vec<PlaceCategory>) -> Self {
        Self { places, categories }
    }

    /// Decodes a catalog from the two JSON array documents of the feed.
    pub fn from_json(places_json: &str, categories_json: &str) -> Result<Self> {
        let places = serde_json::from_str(places_json)?;
        let categories = serde_json::from_str(categories_json)?;
        Ok(Self::new(places, categories))
    }

    /// All places, in load order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// All categories, in load order.
    pub fn categories(&self) -> &[PlaceCategory] {
        &self.categories
    }

    /// True when no places are loaded.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Looks up a place by id.
    pub fn place(&self, id: i64) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Looks up a category by id.
    pub fn category(&self, id: i64) -> Option<&PlaceCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Name of the category a place belongs to.
    pub fn category_name(&self, place: &Place) -> Option<&str> {
        self.category(place.category_id).map(|c| c.name.as_str())
    }

    /// Categories offered to the user for selection: "All" first, then the
    /// loaded categories in order.
    pub fn selector_options(&self) -> Vec<PlaceCategory> {
        std::iter::once(PlaceCategory::new(crate::SHOW_ALL_ID, "All"))
            .chain(self.categories.iter().cloned())
            .collect()
    }
}
