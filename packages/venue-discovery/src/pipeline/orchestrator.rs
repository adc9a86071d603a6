//! The discovery pipeline.
//!
//! Pipeline:
//! 1. Validate the request (fatal on failure, before any provider call)
//! 2. Expand each sport into search phrases, specific first
//! 3. Text search per phrase; a failed search skips only that phrase
//! 4. Per hit: convert -> retail denylist -> score -> polygon containment
//! 5. Routed drive time per surviving hit; routing is authoritative
//! 6. If nothing at all came back, one broad untyped search for the first sport
//! 7. Dedupe, rank, and fall back to a small pre-filter sample when every
//!    hit was filtered out

use futures::stream::{self, StreamExt};
use google_places_client::PlacesClient;
use mapbox_client::MapboxClient;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::aggregate::ResultAggregator;
use super::convert::to_entity;
use crate::config::DiscoveryConfig;
use crate::credentials::ProviderCredentials;
use crate::error::{DiscoveryError, ProviderError, ProviderResult, Result};
use crate::keywords::KeywordExpander;
use crate::providers::{GooglePlacesSearch, MapboxIsochrones, MapboxRouter};
use crate::rules::{EntityScorer, RetailExclusionFilter};
use crate::traits::{PlacesSearch, RawPlace, ReachabilityProvider, RouteOutcome, Router};
use crate::types::{
    Coordinates, Diagnostics, Entity, GeoJsonPolygon, ReachabilityRegion, SearchOutcome,
    SearchRequest, SearchResponse, Sport,
};

/// Runs discovery requests against a set of providers.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent runs.
pub struct SearchOrchestrator {
    places: Arc<dyn PlacesSearch>,
    router: Arc<dyn Router>,
    reachability: Option<Arc<dyn ReachabilityProvider>>,
    expander: KeywordExpander,
    scorer: EntityScorer,
    exclusion: RetailExclusionFilter,
    config: DiscoveryConfig,
}

impl SearchOrchestrator {
    pub fn new(places: Arc<dyn PlacesSearch>, router: Arc<dyn Router>) -> Self {
        Self {
            places,
            router,
            reachability: None,
            expander: KeywordExpander::default(),
            scorer: EntityScorer::default(),
            exclusion: RetailExclusionFilter::default(),
            config: DiscoveryConfig::default(),
        }
    }

    /// Wire up Google Places search and Mapbox routing and isochrones.
    pub fn from_credentials(
        credentials: &ProviderCredentials,
        config: DiscoveryConfig,
    ) -> Result<Self> {
        let places_client = PlacesClient::new(credentials.google_places_api_key.expose())
            .map_err(|e| DiscoveryError::Configuration(format!("places client: {}", e)))?;
        let mapbox = MapboxClient::new(credentials.mapbox_access_token.expose())
            .map_err(|e| DiscoveryError::Configuration(format!("mapbox client: {}", e)))?;

        let places =
            GooglePlacesSearch::new(places_client).with_max_results(config.max_results_per_search);

        Ok(
            Self::new(Arc::new(places), Arc::new(MapboxRouter::new(mapbox.clone())))
                .with_reachability(Arc::new(MapboxIsochrones::new(mapbox)))
                .with_config(config),
        )
    }

    /// Like [`Self::from_credentials`], reading credentials from the
    /// environment. Missing credentials are a configuration error.
    pub fn from_env(config: DiscoveryConfig) -> Result<Self> {
        let credentials = ProviderCredentials::from_env()?;
        Self::from_credentials(&credentials, config)
    }

    pub fn with_reachability(mut self, provider: Arc<dyn ReachabilityProvider>) -> Self {
        self.reachability = Some(provider);
        self
    }

    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_expander(mut self, expander: KeywordExpander) -> Self {
        self.expander = expander;
        self
    }

    pub fn with_exclusion(mut self, exclusion: RetailExclusionFilter) -> Self {
        self.exclusion = exclusion;
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Ask the reachability provider for the drive-time polygon around
    /// `center`. Callers pass the result back in as the request polygon.
    pub async fn reachability(
        &self,
        center: Coordinates,
        minutes: u32,
    ) -> ProviderResult<GeoJsonPolygon> {
        let provider = self
            .reachability
            .as_ref()
            .ok_or_else(|| ProviderError::Unusable {
                provider: "reachability",
                message: "no reachability provider configured".to_string(),
            })?;

        provider.generate(center, minutes).await.inspect_err(|e| {
            warn!(lat = center.lat, lng = center.lng, minutes, error = %e, "Isochrone generation failed");
        })
    }

    /// Run the pipeline and fold a fatal error into the wire error shape.
    pub async fn respond(&self, request: &SearchRequest) -> SearchOutcome {
        match self.run(request).await {
            Ok(response) => SearchOutcome::Found(response),
            Err(e) => {
                warn!(error = %e, "Discovery request rejected");
                SearchOutcome::Failed(e.into())
            }
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Only validation errors fail the call. Provider and conversion
    /// failures shrink the result and show up in the diagnostics.
    pub async fn run(&self, request: &SearchRequest) -> Result<SearchResponse> {
        request.validate()?;

        let region = request
            .isochrone_polygon
            .as_ref()
            .map(GeoJsonPolygon::to_region)
            .transpose()?;

        let ctx = RunContext {
            origin: request.origin,
            budget_minutes: request.drive_time_minutes,
            radius_meters: self.config.search_radius_meters(request.drive_time_minutes),
            region: region.as_ref(),
        };

        info!(
            lat = ctx.origin.lat,
            lng = ctx.origin.lng,
            sports = request.sports.len(),
            budget_minutes = ctx.budget_minutes,
            radius_meters = ctx.radius_meters,
            has_polygon = ctx.region.is_some(),
            "Starting discovery run"
        );

        let mut state = RunState::default();
        let type_filter = self.config.place_type_filter.as_slice();

        for sport in &request.sports {
            for keyword in self.expander.expand(sport) {
                self.search_keyword(&ctx, &keyword, sport, Some(type_filter), &mut state)
                    .await;
            }
        }

        if state.diagnostics.raw_found == 0 {
            if let Some(sport) = request.sports.first() {
                let query = self.expander.fallback_query(sport);
                info!(query = %query, "No hits for any keyword, running broad fallback search");
                state.diagnostics.fallback_used = true;
                self.search_keyword(&ctx, &query, sport, None, &mut state)
                    .await;
            }
        }

        let response = state.finish(self.config.bypass_sample_size);
        let d = &response.diagnostics;
        info!(
            raw_found = d.raw_found,
            after_containment = d.after_containment,
            after_routing = d.after_routing,
            unique_count = d.unique_count,
            bypassed = d.bypassed,
            "Discovery run completed"
        );

        Ok(response)
    }

    async fn search_keyword(
        &self,
        ctx: &RunContext<'_>,
        query: &str,
        sport: &Sport,
        type_filter: Option<&[String]>,
        state: &mut RunState,
    ) {
        state.diagnostics.keywords_searched += 1;

        let hits = match self
            .places
            .text_search(query, ctx.origin, ctx.radius_meters, type_filter)
            .await
        {
            Ok(hits) => hits,
            Err(e) => {
                state.diagnostics.search_failures += 1;
                warn!(
                    query,
                    lat = ctx.origin.lat,
                    lng = ctx.origin.lng,
                    radius_meters = ctx.radius_meters,
                    error = %e,
                    "Search failed, skipping keyword"
                );
                return;
            }
        };

        debug!(query, count = hits.len(), "Search returned hits");
        state.diagnostics.raw_found += hits.len();

        let candidates: Vec<usize> = hits
            .into_iter()
            .filter_map(|hit| self.screen(hit, sport, ctx, state))
            .collect();

        self.verify_routes(ctx, candidates, state).await;
    }

    /// Convert, denylist, score and containment-test one hit. Returns the
    /// arena index of a hit that still needs routing.
    fn screen(
        &self,
        hit: RawPlace,
        sport: &Sport,
        ctx: &RunContext<'_>,
        state: &mut RunState,
    ) -> Option<usize> {
        let mut entity = match to_entity(hit, sport) {
            Ok(entity) => entity,
            Err(e) => {
                state.diagnostics.conversion_failures += 1;
                debug!(error = %e, "Skipping unusable search hit");
                return None;
            }
        };

        if let Some(fragment) = self.exclusion.matched_fragment(&entity) {
            state.diagnostics.excluded += 1;
            debug!(name = %entity.name, fragment, "Excluded retail chain");
            return None;
        }

        self.scorer.apply(&mut entity);

        let location = entity.location;
        let idx = state.push(entity);

        if let Some(region) = ctx.region {
            if !region.contains(&location) {
                debug!(id = %state.arena[idx].id, "Outside reachability polygon");
                return None;
            }
        }

        // One routing call per id per run, whether the repeat comes from
        // the same batch or a later keyword.
        if !state.routed_ids.insert(state.arena[idx].id.clone()) {
            debug!(id = %state.arena[idx].id, "Already sent to routing");
            return None;
        }
        state.diagnostics.after_containment += 1;

        Some(idx)
    }

    /// Route every candidate, at most `routing_concurrency` at a time.
    /// Outcomes come back in candidate order.
    async fn verify_routes(&self, ctx: &RunContext<'_>, candidates: Vec<usize>, state: &mut RunState) {
        if candidates.is_empty() {
            return;
        }

        let jobs: Vec<(usize, Coordinates)> = candidates
            .into_iter()
            .map(|idx| (idx, state.arena[idx].location))
            .collect();

        let router = &self.router;
        let origin = ctx.origin;
        let outcomes: Vec<(usize, ProviderResult<RouteOutcome>)> = stream::iter(jobs)
            .map(|(idx, destination)| async move {
                (idx, router.route(origin, destination).await)
            })
            .buffered(self.config.routing_concurrency.max(1))
            .collect()
            .await;

        for (idx, outcome) in outcomes {
            self.apply_route(ctx, idx, outcome, state);
        }
    }

    fn apply_route(
        &self,
        ctx: &RunContext<'_>,
        idx: usize,
        outcome: ProviderResult<RouteOutcome>,
        state: &mut RunState,
    ) {
        let entity = &mut state.arena[idx];

        match outcome {
            Ok(RouteOutcome::Found(route)) => {
                let minutes = route.minutes();
                if self.config.accepts_drive_time(ctx.budget_minutes, minutes) {
                    entity.attach_route(minutes, route.miles());
                    state.diagnostics.after_routing += 1;
                    state.accept(idx);
                } else {
                    debug!(id = %entity.id, minutes, "Beyond drive-time budget");
                }
            }
            Ok(RouteOutcome::Unreachable) => {
                debug!(id = %entity.id, "No drivable route");
            }
            Err(e) => {
                state.diagnostics.routing_failures += 1;
                if ctx.region.is_some() {
                    warn!(
                        id = %entity.id,
                        lat = entity.location.lat,
                        lng = entity.location.lng,
                        error = %e,
                        "Routing failed, keeping entity on polygon containment"
                    );
                    state.diagnostics.degraded_inclusions += 1;
                    state.accept(idx);
                } else {
                    warn!(
                        id = %entity.id,
                        lat = entity.location.lat,
                        lng = entity.location.lng,
                        error = %e,
                        "Routing failed with no polygon to fall back on, dropping entity"
                    );
                }
            }
        }
    }
}

/// Per-request inputs shared by every stage.
struct RunContext<'a> {
    origin: Coordinates,
    budget_minutes: f64,
    radius_meters: f64,
    region: Option<&'a ReachabilityRegion>,
}

/// Per-request accumulators.
///
/// Every scored, non-excluded entity lives in `arena` in processing order;
/// later stages refer to entities by index. `routed_ids` holds every id
/// handed to routing, pending or done. Discarded with the response.
#[derive(Default)]
struct RunState {
    arena: Vec<Entity>,
    accepted: Vec<usize>,
    routed_ids: HashSet<String>,
    diagnostics: Diagnostics,
}

impl RunState {
    fn push(&mut self, entity: Entity) -> usize {
        self.arena.push(entity);
        self.arena.len() - 1
    }

    fn accept(&mut self, idx: usize) {
        self.accepted.push(idx);
    }

    fn finish(self, bypass_sample_size: usize) -> SearchResponse {
        let RunState {
            arena,
            accepted,
            mut diagnostics,
            ..
        } = self;

        let survivors: Vec<Entity> = accepted.iter().map(|&idx| arena[idx].clone()).collect();
        let mut entities = ResultAggregator::finalize(survivors);

        if entities.is_empty() && diagnostics.raw_found > 0 {
            diagnostics.bypassed = true;
            entities = ResultAggregator::dedupe(arena)
                .into_iter()
                .take(bypass_sample_size)
                .collect();
            warn!(
                raw_found = diagnostics.raw_found,
                sample = entities.len(),
                "Every hit was filtered out, returning pre-filter sample"
            );
        }

        diagnostics.unique_count = entities.len();
        SearchResponse {
            entities,
            diagnostics,
        }
    }
}
