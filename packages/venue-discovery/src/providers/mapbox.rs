//! Routing and isochrones backed by Mapbox.

use async_trait::async_trait;
use mapbox_client::{MapboxClient, MapboxError, MAX_ISOCHRONE_MINUTES};

use crate::error::{ProviderError, ProviderResult};
use crate::traits::{ReachabilityProvider, RouteOutcome, RouteSummary, Router};
use crate::types::{Coordinates, GeoJsonPolygon};

const DIRECTIONS: &str = "mapbox-directions";
const ISOCHRONE: &str = "mapbox-isochrone";

/// Adapts [`MapboxClient`] directions to [`Router`].
#[derive(Clone)]
pub struct MapboxRouter {
    client: MapboxClient,
}

impl MapboxRouter {
    pub fn new(client: MapboxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Router for MapboxRouter {
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> ProviderResult<RouteOutcome> {
        let route = self
            .client
            .directions(origin.to_lng_lat(), destination.to_lng_lat())
            .await
            .map_err(|e| map_error(DIRECTIONS, e))?;

        Ok(match route {
            Some(r) => RouteOutcome::Found(RouteSummary::new(r.distance, r.duration)),
            None => RouteOutcome::Unreachable,
        })
    }
}

/// Adapts [`MapboxClient`] isochrones to [`ReachabilityProvider`].
#[derive(Clone)]
pub struct MapboxIsochrones {
    client: MapboxClient,
}

impl MapboxIsochrones {
    pub fn new(client: MapboxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReachabilityProvider for MapboxIsochrones {
    async fn generate(&self, center: Coordinates, minutes: u32) -> ProviderResult<GeoJsonPolygon> {
        // Mapbox caps contours; a larger budget gets the largest polygon it
        // will draw and routing decides the rest.
        let contour = minutes.clamp(1, MAX_ISOCHRONE_MINUTES);

        let response = self
            .client
            .isochrone(center.to_lng_lat(), contour)
            .await
            .map_err(|e| map_error(ISOCHRONE, e))?;

        let rings = response
            .first_polygon()
            .ok_or_else(|| ProviderError::Unusable {
                provider: ISOCHRONE,
                message: "response contained no polygon".to_string(),
            })?;

        Ok(GeoJsonPolygon::new(rings.to_vec()))
    }
}

fn map_error(provider: &'static str, err: MapboxError) -> ProviderError {
    match err {
        MapboxError::Api { status, message } => ProviderError::Status {
            provider,
            status,
            message,
        },
        other => ProviderError::Request {
            provider,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_status_and_provider() {
        let err = map_error(
            DIRECTIONS,
            MapboxError::Api {
                status: 401,
                message: "Not Authorized - Invalid Token".to_string(),
            },
        );
        assert!(matches!(
            err,
            ProviderError::Status {
                provider: DIRECTIONS,
                status: 401,
                ..
            }
        ));
    }

    #[test]
    fn test_config_error_is_a_request_failure() {
        let err = map_error(ISOCHRONE, MapboxError::Config("contour out of range".into()));
        assert!(err.to_string().contains("mapbox-isochrone"));
        assert!(matches!(err, ProviderError::Request { .. }));
    }
}
