//! Pipeline tuning knobs.

use serde::{Deserialize, Serialize};

/// Configuration for a discovery run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Search radius granted per minute of drive-time budget.
    /// Containment and routing tighten it later.
    /// Default: 1000 m.
    pub radius_meters_per_minute: f64,

    /// Upper bound on the search radius. Default: 50 km.
    pub max_radius_meters: f64,

    /// Slack added to the budget when accepting a routed drive time.
    /// Default: 1 minute.
    pub drive_time_tolerance_minutes: f64,

    /// Entities returned when every hit was filtered out. Default: 5.
    pub bypass_sample_size: usize,

    /// Place types a keyword search is restricted to.
    ///
    /// The broad fallback search ignores this list.
    pub place_type_filter: Vec<String>,

    /// Routing calls allowed in flight at once. Default: 1 (sequential).
    pub routing_concurrency: usize,

    /// Hits requested from the search provider per call. Default: 20.
    pub max_results_per_search: u32,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            radius_meters_per_minute: 1000.0,
            max_radius_meters: 50_000.0,
            drive_time_tolerance_minutes: 1.0,
            bypass_sample_size: 5,
            place_type_filter: vec![
                "sports_club".to_string(),
                "sports_complex".to_string(),
                "school".to_string(),
                "gym".to_string(),
                "community_center".to_string(),
            ],
            routing_concurrency: 1,
            max_results_per_search: 20,
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_radius(mut self, meters: f64) -> Self {
        self.max_radius_meters = meters;
        self
    }

    pub fn with_tolerance(mut self, minutes: f64) -> Self {
        self.drive_time_tolerance_minutes = minutes;
        self
    }

    pub fn with_bypass_sample_size(mut self, size: usize) -> Self {
        self.bypass_sample_size = size;
        self
    }

    pub fn with_place_types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.place_type_filter = types.into_iter().map(|t| t.into()).collect();
        self
    }

    /// Set routing concurrency. Zero is treated as one.
    pub fn with_routing_concurrency(mut self, concurrency: usize) -> Self {
        self.routing_concurrency = concurrency.max(1);
        self
    }

    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results_per_search = max;
        self
    }

    /// Radius for a text search given the drive-time budget.
    pub fn search_radius_meters(&self, drive_time_minutes: f64) -> f64 {
        (drive_time_minutes * self.radius_meters_per_minute).min(self.max_radius_meters)
    }

    /// Whether a routed drive time in whole minutes fits the budget plus tolerance.
    pub fn accepts_drive_time(&self, budget_minutes: f64, routed_minutes: u32) -> bool {
        f64::from(routed_minutes) <= budget_minutes + self.drive_time_tolerance_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_scales_with_budget() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.search_radius_meters(15.0), 15_000.0);
    }

    #[test]
    fn test_radius_is_capped() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.search_radius_meters(90.0), 50_000.0);
        assert_eq!(config.with_max_radius(10_000.0).search_radius_meters(30.0), 10_000.0);
    }

    #[test]
    fn test_drive_time_tolerance() {
        let config = DiscoveryConfig::default();
        assert!(config.accepts_drive_time(20.0, 21));
        assert!(!config.accepts_drive_time(20.0, 22));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: DiscoveryConfig =
            serde_json::from_str(r#"{"routing_concurrency": 4}"#).unwrap();
        assert_eq!(config.routing_concurrency, 4);
        assert_eq!(config.bypass_sample_size, 5);
        assert_eq!(config.place_type_filter.len(), 5);
    }

    #[test]
    fn test_zero_concurrency_is_sequential() {
        assert_eq!(
            DiscoveryConfig::new().with_routing_concurrency(0).routing_concurrency,
            1
        );
    }
}
