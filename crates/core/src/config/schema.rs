//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Default places feed.
pub const DEFAULT_PLACES_URL: &str = "https://gist.githubusercontent.com/saravanabalagi/541a511eb71c366e0bf3eecbee2dab0a/raw/bb1529d2e5b71fd06760cb030d6e15d6d56c34b3/places.json";

/// Default place categories feed.
pub const DEFAULT_CATEGORIES_URL: &str = "https://gist.githubusercontent.com/saravanabalagi/541a511eb71c366e0bf3eecbee2dab0a/raw/bb1529d2e5b71fd06760cb030d6e15d6d56c34b3/place_types.json";

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the place catalog is loaded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL or file path of the places JSON array
    #[serde(default = "default_places_url")]
    pub places_url: String,

    /// URL or file path of the categories JSON array
    #[serde(default = "default_categories_url")]
    pub categories_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            places_url: default_places_url(),
            categories_url: default_categories_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_places_url() -> String {
    DEFAULT_PLACES_URL.to_string()
}

fn default_categories_url() -> String {
    DEFAULT_CATEGORIES_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Query defaults and bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Radius used when none is given, in kilometers
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    /// Smallest radius a caller may select
    #[serde(default = "default_min_radius_km")]
    pub min_radius_km: f64,

    /// Largest radius a caller may select
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,

    /// Query latitude when no location is available
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,

    /// Query longitude when no location is available
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            min_radius_km: default_min_radius_km(),
            max_radius_km: default_max_radius_km(),
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
        }
    }
}

impl QueryConfig {
    /// Clamps a requested radius into the configured bounds
    pub fn clamp_radius(&self, radius_km: f64) -> f64 {
        radius_km.clamp(self.min_radius_km, self.max_radius_km)
    }
}

fn default_radius_km() -> f64 {
    10.0
}

fn default_min_radius_km() -> f64 {
    1.0
}

fn default_max_radius_km() -> f64 {
    1000.0
}

// Central Ireland
fn default_fallback_latitude() -> f64 {
    53.1424
}

fn default_fallback_longitude() -> f64 {
    -7.6921
}

/// Output formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Digit grouping separator for distances of 100 and above
    #[serde(default = "default_grouping_separator")]
    pub grouping_separator: String,

    /// Unit label appended to distances
    #[serde(default = "default_unit")]
    pub unit: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            grouping_separator: default_grouping_separator(),
            unit: default_unit(),
        }
    }
}

fn default_grouping_separator() -> String {
    ",".to_string()
}

fn default_unit() -> String {
    "km".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}
