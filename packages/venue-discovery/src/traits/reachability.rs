//! Reachability (isochrone) polygon generation.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::{Coordinates, GeoJsonPolygon};

/// Generates the area reachable from a point within a drive time.
///
/// Polygons are GeoJSON: `[lng, lat]` positions, closed rings.
#[async_trait]
pub trait ReachabilityProvider: Send + Sync {
    async fn generate(&self, center: Coordinates, minutes: u32) -> ProviderResult<GeoJsonPolygon>;
}
