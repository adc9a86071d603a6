//! Pure Mapbox REST client.
//!
//! Two endpoints: driving isochrones (reachability polygons) and driving
//! directions between two points. All coordinates are `[lng, lat]`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mapbox_client::MapboxClient;
//!
//! let client = MapboxClient::new("pk.your-token")?;
//! let iso = client.isochrone([-93.26, 44.97], 20).await?;
//! let route = client.directions([-93.26, 44.97], [-93.10, 44.95]).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{MapboxError, Result};
pub use types::{
    ContourProperties, DirectionsResponse, Geometry, IsochroneFeature, IsochroneResponse,
    Position, Route,
};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

const BASE_URL: &str = "https://api.mapbox.com";

/// Per-request timeout unless overridden with [`MapboxClient::with_timeout`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest contour the isochrone endpoint accepts.
pub const MAX_ISOCHRONE_MINUTES: u32 = 60;

#[derive(Clone)]
pub struct MapboxClient {
    http_client: Client,
    access_token: String,
    base_url: String,
    timeout: Duration,
}

fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

impl MapboxClient {
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(DEFAULT_TIMEOUT)?,
            access_token: access_token.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create from environment variable `MAPBOX_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("MAPBOX_ACCESS_TOKEN")
            .map_err(|_| MapboxError::Config("MAPBOX_ACCESS_TOKEN not set".into()))?;
        Self::new(token)
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

    fn isochrone_url(&self, center: Position) -> String {
        format!(
            "{}/isochrone/v1/mapbox/driving/{},{}",
            self.base_url.trim_end_matches('/'),
            center[0],
            center[1]
        )
    }

    fn directions_url(&self, origin: Position, destination: Position) -> String {
        format!(
            "{}/directions/v5/mapbox/driving/{},{};{},{}",
            self.base_url.trim_end_matches('/'),
            origin[0],
            origin[1],
            destination[0],
            destination[1]
        )
    }

    /// GET `url` and return the status with the raw body. Server errors
    /// fail here; 4xx bodies are left to the caller, since Directions
    /// reports routing outcomes like NoRoute that way.
    async fn get_text(&self, url: &str, params: &[(&str, String)]) -> Result<(u16, String)> {
        let resp = self
            .http_client
            .get(url)
            .query(params)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() && !status.is_client_error() {
            return Err(MapboxError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok((status.as_u16(), body))
    }

    /// Fetch the driving isochrone polygon reachable from `center` in `minutes`.
    pub async fn isochrone(&self, center: Position, minutes: u32) -> Result<IsochroneResponse> {
        if minutes == 0 || minutes > MAX_ISOCHRONE_MINUTES {
            return Err(MapboxError::Config(format!(
                "contour must be between 1 and {} minutes, got {}",
                MAX_ISOCHRONE_MINUTES, minutes
            )));
        }

        tracing::debug!(lng = center[0], lat = center[1], minutes, "Mapbox isochrone");

        let params = [
            ("contours_minutes", minutes.to_string()),
            ("polygons", "true".to_string()),
        ];
        let (status, body) = self.get_text(&self.isochrone_url(center), &params).await?;
        decode_isochrone(status, body)
    }

    /// Best driving route between two points.
    ///
    /// Returns `Ok(None)` when Mapbox answers that no route exists, which is
    /// distinct from the request itself failing.
    pub async fn directions(
        &self,
        origin: Position,
        destination: Position,
    ) -> Result<Option<Route>> {
        let params = [("overview", "false".to_string())];
        let (status, body) = self
            .get_text(&self.directions_url(origin, destination), &params)
            .await?;

        let parsed: DirectionsResponse = decode_body(status, body)?;
        interpret_directions(status, parsed)
    }
}

/// Decode a 2xx or 4xx body. A 4xx body that is not the expected shape is
/// reported as an API error carrying the body text.
fn decode_body<T: DeserializeOwned>(status: u16, body: String) -> Result<T> {
    match serde_json::from_str(&body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if status >= 400 => Err(MapboxError::Api {
            status,
            message: body,
        }),
        Err(e) => Err(MapboxError::Parse(e)),
    }
}

/// Isochrones have no 4xx outcome worth decoding; any rejection keeps
/// Mapbox's own message.
fn decode_isochrone(status: u16, body: String) -> Result<IsochroneResponse> {
    if status >= 400 {
        return Err(MapboxError::Api {
            status,
            message: body,
        });
    }
    decode_body(status, body)
}

fn interpret_directions(status: u16, response: DirectionsResponse) -> Result<Option<Route>> {
    match response.code.as_str() {
        "Ok" => Ok(response.routes.first().copied()),
        "NoRoute" | "NoSegment" => Ok(None),
        other => Err(MapboxError::Api {
            status,
            message: response
                .message
                .unwrap_or_else(|| format!("directions returned code {}", other)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_lng_lat() {
        let client = MapboxClient::new("tok")
            .unwrap()
            .with_base_url("http://localhost:1234/");
        assert_eq!(
            client.isochrone_url([-93.25, 44.5]),
            "http://localhost:1234/isochrone/v1/mapbox/driving/-93.25,44.5"
        );
        assert_eq!(
            client.directions_url([-93.25, 44.5], [-93.0, 45.0]),
            "http://localhost:1234/directions/v5/mapbox/driving/-93.25,44.5;-93,45"
        );
    }

    #[test]
    fn test_decode_isochrone_polygon() {
        let body = r##"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"contour": 15, "color": "#6706ce"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-93.3, 44.9], [-93.2, 44.9], [-93.2, 45.0], [-93.3, 44.9]]]
                }
            }]
        }"##;

        let parsed: IsochroneResponse = serde_json::from_str(body).unwrap();
        let rings = parsed.first_polygon().unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][0], [-93.3, 44.9]);
        assert_eq!(parsed.features[0].properties.contour, Some(15));
    }

    #[test]
    fn test_isochrone_rejection_keeps_mapbox_message() {
        let body = r#"{"message": "Not Authorized - Invalid Token"}"#.to_string();
        match decode_isochrone(401, body) {
            Err(MapboxError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert!(message.contains("Not Authorized - Invalid Token"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_directions_unparseable_4xx_is_api_error() {
        let err = decode_body::<DirectionsResponse>(404, "Not Found".to_string()).unwrap_err();
        assert!(matches!(err, MapboxError::Api { status: 404, ref message } if message == "Not Found"));
    }

    #[test]
    fn test_requests_are_time_bounded() {
        let client = MapboxClient::new("tok").unwrap();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
        let client = client.with_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_line_string_is_not_a_polygon() {
        let body = r#"{"features": [{"geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}}]}"#;
        let parsed: IsochroneResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.first_polygon().is_none());
    }

    #[test]
    fn test_directions_ok_takes_first_route() {
        let body = r#"{"code": "Ok", "routes": [{"distance": 12000.5, "duration": 900.0}, {"distance": 1.0, "duration": 1.0}]}"#;
        let parsed: DirectionsResponse = serde_json::from_str(body).unwrap();
        let route = interpret_directions(200, parsed).unwrap().unwrap();
        assert_eq!(route.duration, 900.0);
        assert_eq!(route.distance, 12000.5);
    }

    #[test]
    fn test_directions_no_route_is_not_an_error() {
        let body = r#"{"code": "NoRoute", "message": "No route found"}"#;
        let parsed: DirectionsResponse = serde_json::from_str(body).unwrap();
        assert!(interpret_directions(422, parsed).unwrap().is_none());
    }

    #[test]
    fn test_directions_invalid_input_is_an_error() {
        let body = r#"{"code": "InvalidInput", "message": "bad coordinates"}"#;
        let parsed: DirectionsResponse = serde_json::from_str(body).unwrap();
        let err = interpret_directions(422, parsed).unwrap_err();
        assert!(matches!(err, MapboxError::Api { status: 422, .. }));
    }
}
