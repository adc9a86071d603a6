//! Point-to-point driving routes.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::Coordinates;

const METERS_PER_MILE: f64 = 1609.344;

/// Best route between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RouteSummary {
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
        }
    }

    /// Duration rounded to whole minutes.
    pub fn minutes(&self) -> u32 {
        (self.duration_seconds / 60.0).round().max(0.0) as u32
    }

    /// Distance in miles, one decimal place.
    pub fn miles(&self) -> f64 {
        (self.distance_meters / METERS_PER_MILE * 10.0).round() / 10.0
    }
}

/// What a successful routing call found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteOutcome {
    Found(RouteSummary),
    /// The provider answered that no drivable route exists.
    Unreachable,
}

/// Driving directions.
///
/// `Err` means the call failed; an answer of "no route" is
/// `Ok(RouteOutcome::Unreachable)`.
#[async_trait]
pub trait Router: Send + Sync {
    async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> ProviderResult<RouteOutcome>;
}
