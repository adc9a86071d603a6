//! Places search backed by Google Places API (New).

use async_trait::async_trait;
use google_places_client::{LatLng, Place, PlacesClient, PlacesError, TextSearchRequest};

use crate::error::{ProviderError, ProviderResult};
use crate::traits::{PlacesSearch, RawPlace};
use crate::types::{normalize_place_type, Coordinates};

const PROVIDER: &str = "google-places";

/// Adapts [`PlacesClient`] to [`PlacesSearch`].
///
/// The text search endpoint restricts to one `includedType` at most, so a
/// multi-type filter is applied to the returned hits instead.
pub struct GooglePlacesSearch {
    client: PlacesClient,
    max_results: u32,
}

impl GooglePlacesSearch {
    pub fn new(client: PlacesClient) -> Self {
        Self {
            client,
            max_results: 20,
        }
    }

    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }
}

#[async_trait]
impl PlacesSearch for GooglePlacesSearch {
    async fn text_search(
        &self,
        query: &str,
        center: Coordinates,
        radius_meters: f64,
        type_filter: Option<&[String]>,
    ) -> ProviderResult<Vec<RawPlace>> {
        let mut request = TextSearchRequest::new(query)
            .with_circle(
                LatLng {
                    latitude: center.lat,
                    longitude: center.lng,
                },
                radius_meters,
            )
            .with_max_results(self.max_results);

        if let Some([only]) = type_filter {
            request = request.with_included_type(only.as_str());
        }

        let places = self.client.text_search(&request).await.map_err(map_error)?;

        Ok(places
            .into_iter()
            .map(to_raw_place)
            .filter(|p| matches_filter(p, type_filter))
            .collect())
    }
}

fn matches_filter(place: &RawPlace, type_filter: Option<&[String]>) -> bool {
    match type_filter {
        None | Some([]) => true,
        Some(wanted) => place
            .types
            .iter()
            .any(|t| wanted.iter().any(|w| normalize_place_type(w) == *t)),
    }
}

fn to_raw_place(place: Place) -> RawPlace {
    RawPlace {
        name: place.name().map(str::to_string),
        id: place.id,
        address: place.formatted_address,
        location: place
            .location
            .map(|l| Coordinates::new(l.latitude, l.longitude)),
        types: place.types.iter().map(|t| normalize_place_type(t)).collect(),
        rating: place.rating,
        review_count: place.user_rating_count,
        phone: place.national_phone_number,
        website: place.website_uri,
    }
}

fn map_error(err: PlacesError) -> ProviderError {
    match err {
        PlacesError::Api { status, message } => ProviderError::Status {
            provider: PROVIDER,
            status,
            message,
        },
        other => ProviderError::Request {
            provider: PROVIDER,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_places_client::TextSearchResponse;

    fn decode(body: &str) -> Vec<RawPlace> {
        let parsed: TextSearchResponse = serde_json::from_str(body).unwrap();
        parsed.places.into_iter().map(to_raw_place).collect()
    }

    #[test]
    fn test_place_maps_to_raw_place() {
        let places = decode(
            r#"{"places": [{
                "id": "abc",
                "displayName": {"text": "Hopkins Juniors"},
                "location": {"latitude": 44.92, "longitude": -93.41},
                "types": ["sports_club", "establishment"],
                "userRatingCount": 12,
                "nationalPhoneNumber": "(952) 555-0100"
            }]}"#,
        );

        let place = &places[0];
        assert_eq!(place.id.as_deref(), Some("abc"));
        assert_eq!(place.name.as_deref(), Some("Hopkins Juniors"));
        assert_eq!(place.location, Some(Coordinates::new(44.92, -93.41)));
        assert_eq!(place.review_count, Some(12));
        assert_eq!(place.phone.as_deref(), Some("(952) 555-0100"));
        assert!(place.website.is_none());
    }

    #[test]
    fn test_missing_fields_survive_mapping() {
        let places = decode(r#"{"places": [{"displayName": {"text": "No Id"}}]}"#);
        assert!(places[0].id.is_none());
        assert!(places[0].location.is_none());
    }

    #[test]
    fn test_type_filter_keeps_any_match() {
        let filter = vec!["school".to_string(), "sports_club".to_string()];
        let club = RawPlace::new("a", "A", 0.0, 0.0).with_types(&["sports_club"]);
        let cafe = RawPlace::new("b", "B", 0.0, 0.0).with_types(&["cafe"]);

        assert!(matches_filter(&club, Some(&filter)));
        assert!(!matches_filter(&cafe, Some(&filter)));
        assert!(matches_filter(&cafe, None));
    }

    #[test]
    fn test_api_error_keeps_status() {
        let err = map_error(PlacesError::Api {
            status: 429,
            message: "quota".to_string(),
        });
        assert!(matches!(err, ProviderError::Status { status: 429, .. }));
    }
}
