//! Request and response shapes for a discovery run.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::location::{Coordinates, GeoJsonPolygon};
use super::sport::Sport;
use crate::error::{DiscoveryError, ErrorResponse, Result};

/// What the caller wants searched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub origin: Coordinates,
    pub sports: Vec<Sport>,
    pub drive_time_minutes: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isochrone_polygon: Option<GeoJsonPolygon>,
}

impl SearchRequest {
    pub fn new(origin: Coordinates, sports: Vec<Sport>, drive_time_minutes: f64) -> Self {
        Self {
            origin,
            sports,
            drive_time_minutes,
            isochrone_polygon: None,
        }
    }

    pub fn with_polygon(mut self, polygon: GeoJsonPolygon) -> Self {
        self.isochrone_polygon = Some(polygon);
        self
    }

    /// Parse a JSON request body. Malformed or missing fields are a
    /// validation error, not a panic.
    pub fn from_json(body: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(body)
            .map_err(|e| DiscoveryError::validation(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Reject requests that cannot be searched.
    pub fn validate(&self) -> Result<()> {
        if !self.origin.is_valid() {
            return Err(DiscoveryError::validation(format!(
                "origin ({}, {}) is out of range",
                self.origin.lat, self.origin.lng
            )));
        }
        if self.sports.is_empty() {
            return Err(DiscoveryError::validation("sports must not be empty"));
        }
        if self.sports.iter().any(Sport::is_blank) {
            return Err(DiscoveryError::validation("sports must not contain blank names"));
        }
        if !self.drive_time_minutes.is_finite() || self.drive_time_minutes <= 0.0 {
            return Err(DiscoveryError::validation(format!(
                "driveTimeMinutes must be positive, got {}",
                self.drive_time_minutes
            )));
        }
        if let Some(polygon) = &self.isochrone_polygon {
            polygon.to_region()?;
        }
        Ok(())
    }
}

/// Counters explaining how many hits survived each stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Hits returned by the search provider across every call.
    pub raw_found: usize,
    /// Distinct ids that converted, passed the denylist and lay inside the
    /// polygon (every converted, non-excluded id when no polygon was given).
    pub after_containment: usize,
    /// Hits whose routed drive time fit the budget.
    pub after_routing: usize,
    /// Entities in the response.
    pub unique_count: usize,
    /// Set when every hit was filtered and a pre-filter sample is returned.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bypassed: bool,
    pub excluded: usize,
    pub conversion_failures: usize,
    pub search_failures: usize,
    pub routing_failures: usize,
    /// Entities kept without drive data because routing failed after the
    /// polygon had already vouched for them.
    pub degraded_inclusions: usize,
    pub keywords_searched: usize,
    pub fallback_used: bool,
}

/// Successful outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub entities: Vec<Entity>,
    pub diagnostics: Diagnostics,
}

/// What a caller gets back: a response, or `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    Found(SearchResponse),
    Failed(ErrorResponse),
}

impl SearchOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, SearchOutcome::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SearchRequest {
        SearchRequest::new(Coordinates::new(44.97, -93.26), vec![Sport::Volleyball], 20.0)
    }

    #[test]
    fn test_valid_request() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_empty_sports_rejected() {
        let mut request = base();
        request.sports.clear();
        assert!(matches!(request.validate(), Err(DiscoveryError::Validation(_))));
    }

    #[test]
    fn test_non_positive_drive_time_rejected() {
        let mut request = base();
        request.drive_time_minutes = 0.0;
        assert!(request.validate().is_err());
        request.drive_time_minutes = -5.0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bad_origin_rejected() {
        let mut request = base();
        request.origin = Coordinates::new(120.0, 0.0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_from_json_missing_origin_is_validation_error() {
        let err = SearchRequest::from_json(r#"{"sports": ["soccer"], "driveTimeMinutes": 15}"#)
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Validation(msg) if msg.contains("origin")));
    }

    #[test]
    fn test_from_json_with_polygon() {
        let request = SearchRequest::from_json(
            r#"{
                "origin": {"lat": 0.5, "lng": 0.5},
                "sports": ["Soccer", "lacrosse"],
                "driveTimeMinutes": 25,
                "isochronePolygon": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}
            }"#,
        )
        .unwrap();
        assert_eq!(request.sports, vec![Sport::Soccer, Sport::Lacrosse]);
        assert!(request.isochrone_polygon.is_some());
    }

    #[test]
    fn test_failed_outcome_serializes_as_error_object() {
        let outcome = SearchOutcome::Failed(DiscoveryError::validation("no origin").into());
        assert!(outcome.is_error());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"], "invalid request: no origin");
        assert!(json.get("entities").is_none());
    }

    #[test]
    fn test_bypassed_flag_only_serialized_when_set() {
        let json = serde_json::to_value(Diagnostics::default()).unwrap();
        assert!(json.get("bypassed").is_none());
        assert_eq!(json["rawFound"], 0);

        let json = serde_json::to_value(Diagnostics {
            bypassed: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["bypassed"], true);
    }
}
