//! Catalog loader for Placefinder
//!
//! Fetches the places and categories feeds (JSON arrays) from HTTP URLs or
//! local files and assembles a [`Catalog`](placefinder_geo::Catalog).
//!
//! Loading degrades instead of failing: if a feed cannot be fetched or
//! parsed, that collection is empty and the error is reported alongside the
//! catalog. Nothing is retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use placefinder_client::{CatalogClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::with_config(ClientConfig::default().with_env_overrides()?)?;
//!
//!     let load = client.load().await;
//!     for error in &load.errors {
//!         eprintln!("{error}");
//!     }
//!     println!("{} places", load.catalog.places().len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;

pub use client::{CatalogClient, CatalogLoad, Collection, LoadError};
pub use config::{CatalogSource, ClientConfig, CATEGORIES_URL_VAR, PLACES_URL_VAR, TIMEOUT_SECS_VAR};
pub use error::{ClientError, ClientErrorCode, ClientResult};
