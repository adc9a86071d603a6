//! Typed errors for venue discovery.
//!
//! Only [`DiscoveryError`] can fail a request. [`ProviderError`] and
//! [`ConversionError`] are recovered inside the pipeline: the keyword or
//! entity they belong to is skipped and the run continues.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request-fatal errors, raised before any provider is called.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Missing or empty provider credentials
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Missing or malformed request fields
    #[error("invalid request: {0}")]
    Validation(String),
}

impl DiscoveryError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

/// A failed call to a search, routing or reachability provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The call never produced a usable response (network, decoding)
    #[error("{provider} request failed: {message}")]
    Request {
        provider: &'static str,
        message: String,
    },

    /// The provider answered with a non-success status
    #[error("{provider} returned {status}: {message}")]
    Status {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The provider answered, but without the data we asked for
    #[error("{provider} response unusable: {message}")]
    Unusable {
        provider: &'static str,
        message: String,
    },
}

/// A raw search hit that could not become an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("search hit has no id")]
    MissingId,

    #[error("search hit {id} has no name")]
    MissingName { id: String },

    #[error("search hit {id} has no usable location")]
    InvalidLocation { id: String },
}

/// Wire shape of a fatal failure: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&DiscoveryError> for ErrorResponse {
    fn from(err: &DiscoveryError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl From<DiscoveryError> for ErrorResponse {
    fn from(err: DiscoveryError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for request-level operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for provider calls.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
