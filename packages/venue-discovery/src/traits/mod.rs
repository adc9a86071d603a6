//! Provider abstractions.
//!
//! The pipeline only talks to the outside world through these traits, so
//! tests can drive it with the mocks in [`crate::testing`].

pub mod places;
pub mod reachability;
pub mod routing;

pub use places::{PlacesSearch, RawPlace};
pub use reachability::ReachabilityProvider;
pub use routing::{RouteOutcome, RouteSummary, Router};
