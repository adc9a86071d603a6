//! Mock providers for testing.
//!
//! Deterministic, configurable stand-ins for the search, routing and
//! isochrone providers. Every mock records its calls for assertions.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::{
    PlacesSearch, RawPlace, ReachabilityProvider, RouteOutcome, RouteSummary, Router,
};
use crate::types::{Coordinates, GeoJsonPolygon};

/// Record of a search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCall {
    pub query: String,
    pub radius_meters: f64,
    pub type_filter: Option<Vec<String>>,
}

/// Mock places search keyed by exact query text.
///
/// Unknown queries return no hits. Type filters are recorded but not applied.
#[derive(Default)]
pub struct MockPlacesSearch {
    results: RwLock<HashMap<String, Vec<RawPlace>>>,
    failing: RwLock<HashSet<String>>,
    fail_all: bool,
    calls: RwLock<Vec<SearchCall>>,
}

impl MockPlacesSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `places` for `query`.
    pub fn with_results(self, query: &str, places: Vec<RawPlace>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), places);
        self
    }

    /// Fail every call for `query`.
    pub fn failing_on(self, query: &str) -> Self {
        self.failing.write().unwrap().insert(query.to_string());
        self
    }

    /// Fail every call.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.query).collect()
    }
}

#[async_trait]
impl PlacesSearch for MockPlacesSearch {
    async fn text_search(
        &self,
        query: &str,
        _center: Coordinates,
        radius_meters: f64,
        type_filter: Option<&[String]>,
    ) -> ProviderResult<Vec<RawPlace>> {
        self.calls.write().unwrap().push(SearchCall {
            query: query.to_string(),
            radius_meters,
            type_filter: type_filter.map(|t| t.to_vec()),
        });

        if self.fail_all || self.failing.read().unwrap().contains(query) {
            return Err(ProviderError::Status {
                provider: "mock-places",
                status: 500,
                message: format!("configured failure for '{}'", query),
            });
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy)]
enum MockRoute {
    Found(RouteSummary),
    Unreachable,
    Fail,
}

/// Mock router keyed by destination coordinates.
///
/// Destinations without a configured route get the default behavior, which
/// is a failure unless [`MockRouter::with_default_minutes`] was called.
pub struct MockRouter {
    routes: RwLock<HashMap<String, MockRoute>>,
    default: MockRoute,
    calls: RwLock<Vec<Coordinates>>,
}

impl Default for MockRouter {
    fn default() -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
            default: MockRoute::Fail,
            calls: RwLock::new(Vec::new()),
        }
    }
}

fn key(c: Coordinates) -> String {
    format!("{:.6},{:.6}", c.lat, c.lng)
}

impl MockRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A router whose every call fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Route to `destination` taking `minutes` over `miles`.
    pub fn with_route(self, destination: Coordinates, minutes: f64, miles: f64) -> Self {
        let summary = RouteSummary::new(miles * 1609.344, minutes * 60.0);
        self.routes
            .write()
            .unwrap()
            .insert(key(destination), MockRoute::Found(summary));
        self
    }

    pub fn with_unreachable(self, destination: Coordinates) -> Self {
        self.routes
            .write()
            .unwrap()
            .insert(key(destination), MockRoute::Unreachable);
        self
    }

    pub fn with_failure(self, destination: Coordinates) -> Self {
        self.routes
            .write()
            .unwrap()
            .insert(key(destination), MockRoute::Fail);
        self
    }

    /// Unconfigured destinations are `minutes` away (1 mile per minute).
    pub fn with_default_minutes(mut self, minutes: f64) -> Self {
        self.default = MockRoute::Found(RouteSummary::new(minutes * 1609.344, minutes * 60.0));
        self
    }

    pub fn calls(&self) -> Vec<Coordinates> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Router for MockRouter {
    async fn route(
        &self,
        _origin: Coordinates,
        destination: Coordinates,
    ) -> ProviderResult<RouteOutcome> {
        self.calls.write().unwrap().push(destination);

        let route = self
            .routes
            .read()
            .unwrap()
            .get(&key(destination))
            .copied()
            .unwrap_or(self.default);

        match route {
            MockRoute::Found(summary) => Ok(RouteOutcome::Found(summary)),
            MockRoute::Unreachable => Ok(RouteOutcome::Unreachable),
            MockRoute::Fail => Err(ProviderError::Request {
                provider: "mock-router",
                message: format!("configured failure for {}", key(destination)),
            }),
        }
    }
}

/// Mock isochrone provider returning a fixed polygon.
pub struct MockReachability {
    polygon: Option<GeoJsonPolygon>,
    calls: RwLock<Vec<(Coordinates, u32)>>,
}

impl MockReachability {
    pub fn new(polygon: GeoJsonPolygon) -> Self {
        Self {
            polygon: Some(polygon),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// A square of side `2 * half_side` degrees centered on `center`.
    pub fn square(center: Coordinates, half_side: f64) -> Self {
        Self::new(square_polygon(center, half_side))
    }

    pub fn failing() -> Self {
        Self {
            polygon: None,
            calls: RwLock::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Coordinates, u32)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ReachabilityProvider for MockReachability {
    async fn generate(&self, center: Coordinates, minutes: u32) -> ProviderResult<GeoJsonPolygon> {
        self.calls.write().unwrap().push((center, minutes));
        self.polygon.clone().ok_or_else(|| ProviderError::Request {
            provider: "mock-reachability",
            message: "configured failure".to_string(),
        })
    }
}

/// Closed square ring around `center`, GeoJSON `[lng, lat]` order.
pub fn square_polygon(center: Coordinates, half_side: f64) -> GeoJsonPolygon {
    let (lat, lng) = (center.lat, center.lng);
    GeoJsonPolygon::new(vec![vec![
        [lng - half_side, lat - half_side],
        [lng + half_side, lat - half_side],
        [lng + half_side, lat + half_side],
        [lng - half_side, lat + half_side],
        [lng - half_side, lat - half_side],
    ]])
}
