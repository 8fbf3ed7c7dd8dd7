//! Shared command state: configuration, output format, catalog loading

use crate::output::Status;
use crate::{OutputFormat, PointArgs};
use anyhow::Result;
use placefinder_client::{CatalogClient, CatalogSource, ClientConfig};
use placefinder_core::config::Config;
use placefinder_core::Error;
use placefinder_geo::{Catalog, CategoryFilter, Coordinate, NumberFormat};
use placefinder_telemetry::{TelemetryConfig, Timer};
use serde::Serialize;
use std::path::Path;

/// Catalog sources given on the command line
#[derive(Debug, Default)]
pub struct SourceOverrides {
    pub places: Option<String>,
    pub categories: Option<String>,
}

/// Resolved query point
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QueryPoint {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// True when no point was given and the configured fallback was used
    pub fallback: bool,
}

pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
    pub number_format: NumberFormat,
}

impl Context {
    pub fn new(config_path: Option<&Path>, format: OutputFormat) -> Result<Self> {
        let path = config_path.map(|p| p.to_string_lossy().into_owned());
        let config = Config::load(path.as_deref())?;
        let number_format = NumberFormat::with_separator(config.schema.display.grouping_separator.clone());

        Ok(Self {
            config,
            format,
            number_format,
        })
    }

    pub fn init_logging(&self, verbose: bool) -> Result<()> {
        let logging = &self.config.schema.logging;
        let level = if verbose {
            "placefinder=debug,placefinder_client=debug,placefinder_core=debug".to_string()
        } else {
            logging.level.clone()
        };

        placefinder_telemetry::init_with_config(TelemetryConfig {
            json: logging.json,
            ..TelemetryConfig::with_level(level)
        })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Distance rendered with the configured grouping and unit
    pub fn display_km(&self, km: f64) -> String {
        format!("{} {}", self.number_format.format(km), self.config.schema.display.unit)
    }

    /// Query point from arguments, or the configured fallback
    pub fn query_point(&self, args: &PointArgs) -> Result<QueryPoint> {
        match (args.lat, args.lng) {
            (Some(lat), Some(lng)) => {
                let coordinate = Coordinate::try_new(lat, lng)
                    .map_err(|_| Error::invalid_coordinate(lat, lng))?;
                Ok(QueryPoint { coordinate, fallback: false })
            }
            _ => {
                let query = &self.config.schema.query;
                tracing::debug!("No query point given, using fallback coordinate");
                Ok(QueryPoint {
                    coordinate: Coordinate::new(query.fallback_latitude, query.fallback_longitude),
                    fallback: true,
                })
            }
        }
    }

    /// Validated radius, clamped into the configured bounds
    pub fn radius(&self, requested: Option<f64>) -> Result<f64> {
        let query = &self.config.schema.query;
        match requested {
            None => Ok(query.default_radius_km),
            Some(r) if r.is_nan() || r < 0.0 => Err(Error::invalid_radius(r).into()),
            Some(r) => {
                let clamped = query.clamp_radius(r);
                if clamped != r {
                    tracing::debug!(requested = r, used = clamped, "Radius clamped");
                    Status::warning(&format!(
                        "Radius {} km is outside {}..{} km, using {} km",
                        r, query.min_radius_km, query.max_radius_km, clamped
                    ));
                }
                Ok(clamped)
            }
        }
    }

    /// Load the catalog; feed failures are reported and leave that half empty
    pub async fn load_catalog(&self, overrides: &SourceOverrides) -> Result<Catalog> {
        let mut client_config = ClientConfig::from_catalog_config(&self.config.schema.catalog)
            .and_then(ClientConfig::with_env_overrides)
            .map_err(Error::from)?;

        if let Some(places) = &overrides.places {
            client_config = client_config.with_places(CatalogSource::parse(places).map_err(Error::from)?);
        }
        if let Some(categories) = &overrides.categories {
            client_config =
                client_config.with_categories(CatalogSource::parse(categories).map_err(Error::from)?);
        }

        let client = CatalogClient::with_config(client_config).map_err(Error::from)?;

        let timer = Timer::start("catalog_load");
        let load = client.load().await;
        timer.stop();

        for error in &load.errors {
            Status::warning(&error.to_string());
        }
        if load.skipped_places > 0 {
            Status::warning(&format!(
                "Skipped {} place(s) with invalid coordinates",
                load.skipped_places
            ));
        }

        Ok(load.catalog)
    }

    /// Human-readable name of a category selection
    pub fn filter_label(&self, catalog: &Catalog, filter: CategoryFilter) -> String {
        match filter {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Category(id) => catalog
                .category(id)
                .map_or_else(|| format!("#{id}"), |c| c.name.clone()),
        }
    }
}
