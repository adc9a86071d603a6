//! Pure Google Places API (New) REST client.
//!
//! Covers the one endpoint venue discovery needs: text search biased to a
//! circle around a point.
//!
//! # Example
//!
//! ```rust,ignore
//! use google_places_client::{LatLng, PlacesClient, TextSearchRequest};
//!
//! let client = PlacesClient::new("your-api-key")?;
//! let request = TextSearchRequest::new("youth volleyball club")
//!     .with_circle(LatLng { latitude: 44.97, longitude: -93.26 }, 20_000.0);
//!
//! for place in client.text_search(&request).await? {
//!     println!("{}", place.name().unwrap_or("(unnamed)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{PlacesError, Result};
pub use types::{LatLng, LocalizedText, Place, TextSearchRequest, TextSearchResponse};

use reqwest::Client;
use std::time::Duration;

const BASE_URL: &str = "https://places.googleapis.com/v1";

/// Per-request timeout unless overridden with [`PlacesClient::with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fields requested for every text search hit.
pub const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.location,places.types,places.rating,places.userRatingCount,\
places.nationalPhoneNumber,places.websiteUri";

#[derive(Clone)]
pub struct PlacesClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

impl PlacesClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(DEFAULT_TIMEOUT)?,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create from environment variable `GOOGLE_PLACES_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_PLACES_API_KEY")
            .map_err(|_| PlacesError::Config("GOOGLE_PLACES_API_KEY not set".into()))?;
        Self::new(api_key)
    }

    /// Replace the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = build_http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set a custom base URL (proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/places:searchText", self.base_url.trim_end_matches('/'))
    }

    /// Run a text search and return the matching places.
    pub async fn text_search(&self, request: &TextSearchRequest) -> Result<Vec<Place>> {
        tracing::debug!(query = %request.text_query, "Places text search");

        let resp = self
            .http_client
            .post(self.search_url())
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let parsed: TextSearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = parsed.places.len(), "Places text search returned");
        Ok(parsed.places)
    }
}
