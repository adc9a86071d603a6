//! Production provider adapters over the REST clients.

pub mod google;
pub mod mapbox;

pub use google::GooglePlacesSearch;
pub use mapbox::{MapboxIsochrones, MapboxRouter};
