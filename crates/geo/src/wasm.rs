//! WASM bindings for the geo crate.
//!
//! These bindings let a browser map layer call the engine directly. Place
//! collections cross the boundary as JSON strings in the feed format.

use crate::{format_distance as format_km, haversine_distance, CategoryFilter, Coordinate, Place, ProximityQuery};
use wasm_bindgen::prelude::*;

fn parse_places(places_json: &str) -> Result<Vec<Place>, JsValue> {
    serde_json::from_str(places_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))
}

/// Calculate distance between two coordinates in kilometers.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let from = Coordinate::new(lat1, lng1);
    let to = Coordinate::new(lat2, lng2);
    haversine_distance(&from, &to)
}

/// Run a full proximity query.
///
/// # Arguments
/// * `places_json` - JSON array of places
/// * `category_id` - Category to keep, or -1 for all
/// * `lat` / `lng` - Query point
/// * `radius_km` - Radius for the count
///
/// # Returns
/// JSON object with `nearest_place`, `distance_km` and `count_within_radius`
#[wasm_bindgen]
pub fn proximity_query(
    places_json: &str,
    category_id: i64,
    lat: f64,
    lng: f64,
    radius_km: f64,
) -> Result<String, JsValue> {
    let places = parse_places(places_json)?;
    let result = ProximityQuery::try_new(category_id, Coordinate::new(lat, lng), radius_km)
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .evaluate_places(&places);

    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Count places within `radius_km` of the query point.
#[wasm_bindgen]
pub fn count_within_radius(places_json: &str, lat: f64, lng: f64, radius_km: f64) -> Result<usize, JsValue> {
    let places = parse_places(places_json)?;
    let query = ProximityQuery::try_new(CategoryFilter::All, Coordinate::new(lat, lng), radius_km)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(query.evaluate_places(&places).count_within_radius)
}

/// Format a distance for display ("less than 1", "12.3", "1,234").
#[wasm_bindgen]
pub fn format_distance(distance_km: f64) -> String {
    format_km(distance_km).to_string()
}
