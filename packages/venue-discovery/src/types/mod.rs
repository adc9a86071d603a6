//! Domain data types.

pub mod entity;
pub mod location;
pub mod request;
pub mod sport;

pub use entity::{normalize_place_type, AgeGroup, AgeGroupScores, Entity, EntityType};
pub use location::{Coordinates, GeoJsonPolygon, ReachabilityRegion};
pub use request::{Diagnostics, SearchOutcome, SearchRequest, SearchResponse};
pub use sport::Sport;
