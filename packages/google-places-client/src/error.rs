//! Error types for the Places client.

use thiserror::Error;

/// Result type for Places client operations.
pub type Result<T> = std::result::Result<T, PlacesError>;

/// Places client errors.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Configuration error (missing API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response, quota exceeded, invalid request)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
