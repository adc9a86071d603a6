//! Error types for the Mapbox client.

use thiserror::Error;

/// Result type for Mapbox client operations.
pub type Result<T> = std::result::Result<T, MapboxError>;

/// Mapbox client errors.
#[derive(Debug, Error)]
pub enum MapboxError {
    /// Configuration error (missing access token, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response or a non-"Ok" routing code)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
