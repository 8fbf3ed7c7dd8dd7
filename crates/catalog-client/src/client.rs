//! Catalog client implementation

use crate::config::{CatalogSource, ClientConfig};
use crate::error::{ClientError, ClientResult};
use placefinder_geo::{Catalog, Place, PlaceCategory};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Which half of the catalog a load error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// The places feed
    Places,
    /// The categories feed
    Categories,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Places => f.write_str("places"),
            Self::Categories => f.write_str("categories"),
        }
    }
}

/// A failure while loading one collection
#[derive(Debug)]
pub struct LoadError {
    /// Collection that failed
    pub collection: Collection,
    /// What went wrong
    pub error: ClientError,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load {}: {}", self.collection, self.error)
    }
}

/// Outcome of loading the catalog
///
/// Loading never fails as a whole: a collection that cannot be fetched or
/// parsed is left empty and its error is recorded here.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    /// Whatever could be loaded
    pub catalog: Catalog,
    /// Per-collection failures
    pub errors: Vec<LoadError>,
    /// Places dropped for out-of-range coordinates
    pub skipped_places: usize,
}

impl CatalogLoad {
    /// True when both collections loaded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Loads the place catalog from remote feeds or local files
#[derive(Clone)]
pub struct CatalogClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl CatalogClient {
    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("placefinder-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ClientError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the places feed
    ///
    /// Places with out-of-range coordinates are dropped; the second element
    /// of the returned pair is how many were dropped.
    #[instrument(skip(self), fields(source = %self.config.places))]
    pub async fn fetch_places(&self) -> ClientResult<(Vec<Place>, usize)> {
        let places: Vec<Place> = self.fetch_json(&self.config.places).await?;
        let total = places.len();

        let valid: Vec<Place> = places
            .into_iter()
            .filter(|place| {
                let ok = place.coordinate().is_valid();
                if !ok {
                    warn!(
                        id = place.id,
                        latitude = place.latitude,
                        longitude = place.longitude,
                        "Dropping place with invalid coordinate"
                    );
                }
                ok
            })
            .collect();

        let skipped = total - valid.len();
        Ok((valid, skipped))
    }

    /// Fetch the categories feed
    #[instrument(skip(self), fields(source = %self.config.categories))]
    pub async fn fetch_categories(&self) -> ClientResult<Vec<PlaceCategory>> {
        self.fetch_json(&self.config.categories).await
    }

    /// Load both collections concurrently
    pub async fn load(&self) -> CatalogLoad {
        let start = Instant::now();
        let (places, categories) = tokio::join!(self.fetch_places(), self.fetch_categories());

        let mut errors = Vec::new();

        let (places, skipped_places) = places.unwrap_or_else(|error| {
            warn!(%error, "Places could not be loaded");
            errors.push(LoadError { collection: Collection::Places, error });
            (Vec::new(), 0)
        });

        let categories = categories.unwrap_or_else(|error| {
            warn!(%error, "Categories could not be loaded");
            errors.push(LoadError { collection: Collection::Categories, error });
            Vec::new()
        });

        info!(
            places = places.len(),
            categories = categories.len(),
            skipped_places,
            failures = errors.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Catalog loaded"
        );

        CatalogLoad {
            catalog: Catalog::new(places, categories),
            errors,
            skipped_places,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, source: &CatalogSource) -> ClientResult<T> {
        let body = match source {
            CatalogSource::Remote(url) => self.get_text(url).await?,
            CatalogSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ClientError::Io { path: path.clone(), source })?,
        };

        debug!(%source, bytes = body.len(), "Fetched catalog document");

        serde_json::from_str(&body).map_err(|e| ClientError::Json {
            origin: source.to_string(),
            source: e,
        })
    }

    async fn get_text(&self, url: &str) -> ClientResult<String> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Request { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| ClientError::Request { url: url.to_string(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientErrorCode;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;

    const PLACES_JSON: &str = r#"[
        {"id": 1, "name": "Cliffs of Moher", "gaelic_name": "Aillte an Mhothair",
         "place_type_id": 2, "latitude": 52.9715, "longitude": -9.4309},
        {"id": 2, "name": "Skellig Michael", "place_type_id": 7,
         "latitude": 51.7711, "longitude": -10.5406},
        {"id": 3, "name": "Broken", "place_type_id": 7,
         "latitude": 123.0, "longitude": -10.0}
    ]"#;

    const CATEGORIES_JSON: &str = r#"[{"id": 2, "name": "Natural"}, {"id": 7, "name": "Heritage"}]"#;

    fn temp_json(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn file_config(places: PathBuf, categories: PathBuf) -> ClientConfig {
        ClientConfig {
            places: CatalogSource::File(places),
            categories: CatalogSource::File(categories),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let places = temp_json(PLACES_JSON);
        let categories = temp_json(CATEGORIES_JSON);
        let client = CatalogClient::with_config(file_config(
            places.path().to_path_buf(),
            categories.path().to_path_buf(),
        ))
        .unwrap();

        let load = client.load().await;

        assert!(load.is_complete());
        assert_eq!(load.skipped_places, 1);
        assert_eq!(load.catalog.places().len(), 2);
        assert_eq!(load.catalog.categories().len(), 2);
        assert_eq!(load.catalog.places()[1].name, "Skellig Michael");
    }

    #[tokio::test]
    async fn test_missing_places_degrades_to_empty() {
        let categories = temp_json(CATEGORIES_JSON);
        let client = CatalogClient::with_config(file_config(
            PathBuf::from("/nonexistent/places.json"),
            categories.path().to_path_buf(),
        ))
        .unwrap();

        let load = client.load().await;

        assert!(!load.is_complete());
        assert_eq!(load.errors.len(), 1);
        assert_eq!(load.errors[0].collection, Collection::Places);
        assert_eq!(load.errors[0].error.code(), ClientErrorCode::Io);
        assert!(load.catalog.is_empty());
        assert_eq!(load.catalog.categories().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_json_is_reported() {
        let places = temp_json(PLACES_JSON);
        let categories = temp_json(r#"{"id": 1}"#);
        let client = CatalogClient::with_config(file_config(
            places.path().to_path_buf(),
            categories.path().to_path_buf(),
        ))
        .unwrap();

        let load = client.load().await;

        assert_eq!(load.errors.len(), 1);
        assert_eq!(load.errors[0].collection, Collection::Categories);
        assert_eq!(load.errors[0].error.code(), ClientErrorCode::Json);
        assert_eq!(load.catalog.places().len(), 2);
        assert!(load.catalog.categories().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_remote_degrades_to_empty() {
        let config = ClientConfig {
            places: CatalogSource::Remote("http://127.0.0.1:9/places.json".into()),
            categories: CatalogSource::Remote("http://127.0.0.1:9/place_types.json".into()),
            timeout: Duration::from_secs(2),
        };
        let client = CatalogClient::with_config(config).unwrap();

        let load = client.load().await;

        assert_eq!(load.errors.len(), 2);
        assert!(load.errors.iter().all(|e| e.error.code() == ClientErrorCode::Request));
        assert!(load.catalog.is_empty());
        assert!(load.catalog.categories().is_empty());
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError {
            collection: Collection::Categories,
            error: ClientError::Status { url: "https://x/types.json".into(), status: 500 },
        };
        assert_eq!(err.to_string(), "failed to load categories: https://x/types.json returned HTTP 500");
    }
}
