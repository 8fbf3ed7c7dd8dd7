//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist; without one the standard locations are
    /// searched and defaults are used when none is found.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            tracing::debug!(path = %p, "Loading configuration");
            let schema = load_config_file(p)?;
            validate(&schema).with_suggestion(format!("Fix the [query] and [catalog] values in {}", p))?;
            schema
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".placefinder.toml",
        "placefinder.toml",
        ".config/placefinder.toml",
    ];

    for candidate in candidates {
        if Path::new(candidate).exists() {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("While parsing config file {}", path))
}

/// Check cross-field constraints serde cannot express
pub fn validate(schema: &ConfigSchema) -> Result<()> {
    let query = &schema.query;

    if !(query.min_radius_km >= 0.0) {
        return Err(Error::config_invalid(format!(
            "query.min_radius_km must be non-negative, got {}",
            query.min_radius_km
        )));
    }

    if !(query.min_radius_km <= query.default_radius_km
        && query.default_radius_km <= query.max_radius_km)
    {
        return Err(Error::config_invalid(format!(
            "query radius bounds must satisfy min <= default <= max, got {} / {} / {}",
            query.min_radius_km, query.default_radius_km, query.max_radius_km
        )));
    }

    if !(-90.0..=90.0).contains(&query.fallback_latitude)
        || !(-180.0..=180.0).contains(&query.fallback_longitude)
    {
        return Err(Error::config_invalid(format!(
            "query fallback coordinate out of range: {}, {}",
            query.fallback_latitude, query.fallback_longitude
        )));
    }

    if schema.catalog.timeout_secs == 0 {
        return Err(Error::config_invalid("catalog.timeout_secs must be greater than zero"));
    }

    Ok(())
}
