//! Provider credentials with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of API keys.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::{DiscoveryError, Result};

/// Environment variable holding the Google Places API key.
pub const GOOGLE_PLACES_API_KEY: &str = "GOOGLE_PLACES_API_KEY";

/// Environment variable holding the Mapbox access token.
pub const MAPBOX_ACCESS_TOKEN: &str = "MAPBOX_ACCESS_TOKEN";

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value. Only call this when building a provider client.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Credentials for every external provider the pipeline talks to.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub google_places_api_key: SecretString,
    pub mapbox_access_token: SecretString,
}

impl ProviderCredentials {
    /// Build from explicit values. Empty values are a configuration error.
    pub fn new(google_places_api_key: &str, mapbox_access_token: &str) -> Result<Self> {
        Ok(Self {
            google_places_api_key: require(GOOGLE_PLACES_API_KEY, Some(google_places_api_key))?,
            mapbox_access_token: require(MAPBOX_ACCESS_TOKEN, Some(mapbox_access_token))?,
        })
    }

    /// Load from the environment, reading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            google_places_api_key: require(
                GOOGLE_PLACES_API_KEY,
                lookup(GOOGLE_PLACES_API_KEY).as_deref(),
            )?,
            mapbox_access_token: require(
                MAPBOX_ACCESS_TOKEN,
                lookup(MAPBOX_ACCESS_TOKEN).as_deref(),
            )?,
        })
    }
}

fn require(name: &str, value: Option<&str>) -> Result<SecretString> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(SecretString::new(v)),
        Some(_) => Err(DiscoveryError::Configuration(format!("{} is empty", name))),
        None => Err(DiscoveryError::Configuration(format!("{} must be set", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = SecretString::new("pk.abc123");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(secret.expose(), "pk.abc123");
    }

    #[test]
    fn test_from_lookup_reads_both_keys() {
        let creds = ProviderCredentials::from_lookup(lookup(&[
            (GOOGLE_PLACES_API_KEY, "g-key"),
            (MAPBOX_ACCESS_TOKEN, "pk.token"),
        ]))
        .unwrap();
        assert_eq!(creds.google_places_api_key.expose(), "g-key");
        assert_eq!(creds.mapbox_access_token.expose(), "pk.token");
        assert!(!format!("{:?}", creds).contains("g-key"));
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = ProviderCredentials::from_lookup(lookup(&[(GOOGLE_PLACES_API_KEY, "g-key")]))
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Configuration(msg) if msg.contains(MAPBOX_ACCESS_TOKEN)));
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        let err = ProviderCredentials::new("  ", "pk.token").unwrap_err();
        assert!(matches!(err, DiscoveryError::Configuration(_)));
    }
}
