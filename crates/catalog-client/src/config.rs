//! Configuration for the catalog client
//!
//! Sources come from the TOML configuration and may be overridden through
//! environment variables.

use crate::error::{ClientError, ClientResult};
use placefinder_core::config::CatalogConfig;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the places feed
pub const PLACES_URL_VAR: &str = "PLACEFINDER_PLACES_URL";
/// Environment variable overriding the categories feed
pub const CATEGORIES_URL_VAR: &str = "PLACEFINDER_CATEGORIES_URL";
/// Environment variable overriding the request timeout
pub const TIMEOUT_SECS_VAR: &str = "PLACEFINDER_TIMEOUT_SECS";

/// Where one catalog collection is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// HTTP(S) URL
    Remote(String),
    /// Local JSON file
    File(PathBuf),
}

impl CatalogSource {
    /// Interprets `http://` and `https://` values as URLs and anything else as a path
    pub fn parse(value: &str) -> ClientResult<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ClientError::config("catalog source must not be empty"));
        }

        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Self::Remote(value.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(value.strip_prefix("file://").unwrap_or(value))))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Places feed
    pub places: CatalogSource,
    /// Categories feed
    pub categories: CatalogSource,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let catalog = CatalogConfig::default();
        Self {
            places: CatalogSource::Remote(catalog.places_url),
            categories: CatalogSource::Remote(catalog.categories_url),
            timeout: Duration::from_secs(catalog.timeout_secs),
        }
    }
}

impl ClientConfig {
    /// Create configuration from the `[catalog]` table
    pub fn from_catalog_config(catalog: &CatalogConfig) -> ClientResult<Self> {
        let config = Self {
            places: CatalogSource::parse(&catalog.places_url)?,
            categories: CatalogSource::parse(&catalog.categories_url)?,
            timeout: Duration::from_secs(catalog.timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides
    ///
    /// Reads the following environment variables:
    /// - `PLACEFINDER_PLACES_URL`: places feed URL or path
    /// - `PLACEFINDER_CATEGORIES_URL`: categories feed URL or path
    /// - `PLACEFINDER_TIMEOUT_SECS`: request timeout in seconds
    pub fn with_env_overrides(self) -> ClientResult<Self> {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup using the environment variable names
    ///
    /// A timeout that is not a whole number of seconds is ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(places) = lookup(PLACES_URL_VAR) {
            self.places = CatalogSource::parse(&places)?;
        }

        if let Some(categories) = lookup(CATEGORIES_URL_VAR) {
            self.categories = CatalogSource::parse(&categories)?;
        }

        if let Some(raw) = lookup(TIMEOUT_SECS_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.timeout = Duration::from_secs(secs),
                Err(_) => tracing::warn!(value = %raw, "Ignoring non-numeric {}", TIMEOUT_SECS_VAR),
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Replace the places source
    #[must_use]
    pub fn with_places(mut self, places: CatalogSource) -> Self {
        self.places = places;
        self
    }

    /// Replace the categories source
    #[must_use]
    pub fn with_categories(mut self, categories: CatalogSource) -> Self {
        self.categories = categories;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ClientResult<()> {
        if self.timeout.is_zero() {
            return Err(ClientError::config("timeout must be greater than zero"));
        }
        Ok(())
    }
}
