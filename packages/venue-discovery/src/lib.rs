//! Venue Discovery
//!
//! Finds youth and club sports venues within a drive-time budget of an
//! origin and ranks them by how likely each is a genuine club or program
//! rather than a restaurant, retailer or generic gym.
//!
//! # Usage
//!
//! ```rust,ignore
//! use venue_discovery::{Coordinates, DiscoveryConfig, SearchOrchestrator, SearchRequest, Sport};
//!
//! let orchestrator = SearchOrchestrator::from_env(DiscoveryConfig::default())?;
//! let origin = Coordinates::new(44.977, -93.265);
//!
//! // Optional: tighten the search with a drive-time polygon first
//! let polygon = orchestrator.reachability(origin, 20).await.ok();
//!
//! let mut request = SearchRequest::new(origin, vec![Sport::Volleyball], 20.0);
//! request.isochrone_polygon = polygon;
//!
//! let response = orchestrator.run(&request).await?;
//! for venue in &response.entities {
//!     println!("{} ({} pts)", venue.name, venue.confidence_score);
//! }
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - Orchestrator, hit conversion and result aggregation
//! - [`rules`] - Retail denylist, confidence/age-group scoring, entity typing
//! - [`keywords`] - Sport to search phrase expansion
//! - [`traits`] - Provider abstractions (search, routing, isochrones)
//! - [`providers`] - Google Places and Mapbox implementations
//! - [`testing`] - Mock providers for testing

pub mod config;
pub mod credentials;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod providers;
pub mod rules;
pub mod testing;
pub mod traits;
pub mod types;

pub use config::DiscoveryConfig;
pub use credentials::{ProviderCredentials, SecretString};
pub use error::{ConversionError, DiscoveryError, ErrorResponse, ProviderError};
pub use keywords::KeywordExpander;
pub use pipeline::{ResultAggregator, SearchOrchestrator};
pub use providers::{GooglePlacesSearch, MapboxIsochrones, MapboxRouter};
pub use rules::{
    classify_all, classify_entity_type, EntityScorer, RetailExclusionFilter,
    CLUB_CONFIDENCE_THRESHOLD,
};
pub use traits::{
    PlacesSearch, RawPlace, ReachabilityProvider, RouteOutcome, RouteSummary, Router,
};
pub use types::{
    AgeGroup, AgeGroupScores, Coordinates, Diagnostics, Entity, EntityType, GeoJsonPolygon,
    SearchOutcome, SearchRequest, SearchResponse, Sport,
};
