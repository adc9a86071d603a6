use serde::{Deserialize, Serialize};

/// Body for `POST /v1/places:searchText`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchRequest {
    pub text_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationBias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_count: Option<u32>,
}

impl TextSearchRequest {
    pub fn new(text_query: impl Into<String>) -> Self {
        Self {
            text_query: text_query.into(),
            location_bias: None,
            included_type: None,
            max_result_count: None,
        }
    }

    /// Bias results toward a circle around `center`.
    pub fn with_circle(mut self, center: LatLng, radius_meters: f64) -> Self {
        self.location_bias = Some(LocationBias {
            circle: Circle {
                center,
                radius: radius_meters,
            },
        });
        self
    }

    /// Restrict results to a single place type (e.g. `"school"`).
    pub fn with_included_type(mut self, place_type: impl Into<String>) -> Self {
        self.included_type = Some(place_type.into());
        self
    }

    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_result_count = Some(max);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationBias {
    pub circle: Circle,
}

#[derive(Debug, Clone, Serialize)]
pub struct Circle {
    pub center: LatLng,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Response from `places:searchText`. The API omits `places` entirely when
/// nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextSearchResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

/// A single place from a text search.
///
/// Every field is optional on the wire; which ones are populated depends on
/// the field mask sent with the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
    #[serde(default)]
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub national_phone_number: Option<String>,
    pub website_uri: Option<String>,
}

impl Place {
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_ref().map(|n| n.text.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: String,
    pub language_code: Option<String>,
}
