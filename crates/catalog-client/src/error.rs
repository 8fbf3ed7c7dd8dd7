//! Error types for the catalog client

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Catalog client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Reading a local catalog file failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The document was not the expected JSON array
    #[error("Invalid JSON in {origin}: {source}")]
    Json {
        /// URL or path the document came from
        origin: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error code for integration with placefinder-core error handling.
/// Range: 11xxx for client errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorCode {
    /// Transport failure
    Request = 11001,
    /// Non-success HTTP status
    Status = 11002,
    /// Local file could not be read
    Io = 11003,
    /// Malformed JSON
    Json = 11004,
    /// Bad configuration
    Config = 11005,
}

impl ClientError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error code for this error.
    #[must_use]
    pub fn code(&self) -> ClientErrorCode {
        match self {
            Self::Request { .. } => ClientErrorCode::Request,
            Self::Status { .. } => ClientErrorCode::Status,
            Self::Io { .. } => ClientErrorCode::Io,
            Self::Json { .. } => ClientErrorCode::Json,
            Self::Config(_) => ClientErrorCode::Config,
        }
    }
}

impl From<ClientError> for placefinder_core::Error {
    fn from(err: ClientError) -> Self {
        use placefinder_core::ErrorCode;

        let code = match err.code() {
            ClientErrorCode::Json => ErrorCode::CatalogParseError,
            ClientErrorCode::Io => ErrorCode::IoError,
            ClientErrorCode::Config => ErrorCode::ConfigError,
            ClientErrorCode::Request | ClientErrorCode::Status => ErrorCode::CatalogFetchFailed,
        };

        placefinder_core::Error::new(code, err.to_string()).with_source(err)
    }
}
