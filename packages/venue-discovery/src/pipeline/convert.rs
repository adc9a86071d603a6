//! Raw search hit to [`Entity`] conversion.

use crate::error::ConversionError;
use crate::traits::RawPlace;
use crate::types::{normalize_place_type, Entity, Sport};

/// Build an unscored entity from a hit found under `sport`.
///
/// Requires a non-blank id and name and an in-range location.
pub fn to_entity(place: RawPlace, sport: &Sport) -> Result<Entity, ConversionError> {
    let id = non_blank(place.id).ok_or(ConversionError::MissingId)?;
    let name = non_blank(place.name).ok_or_else(|| ConversionError::MissingName { id: id.clone() })?;
    let location = place
        .location
        .filter(|l| l.is_valid())
        .ok_or_else(|| ConversionError::InvalidLocation { id: id.clone() })?;

    let mut entity = Entity::new(id, name, location, sport.clone());
    entity.address = place.address.map(|a| a.trim().to_string()).unwrap_or_default();
    entity.phone = non_blank(place.phone);
    entity.website = non_blank(place.website);
    entity.rating = place.rating.filter(|r| r.is_finite());
    entity.review_count = place.review_count;
    entity.place_types = place
        .types
        .iter()
        .map(|t| normalize_place_type(t))
        .filter(|t| !t.is_empty())
        .collect();

    Ok(entity)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;

    #[test]
    fn test_full_conversion() {
        let mut place = RawPlace::new(" p1 ", "Edina Soccer Club", 44.9, -93.35)
            .with_types(&["Sports Club", "point_of_interest"])
            .with_website(" https://edinasoccer.org ")
            .with_address("5701 Normandale Rd")
            .with_review_count(31);
        place.phone = Some("   ".to_string());

        let entity = to_entity(place, &Sport::Soccer).unwrap();
        assert_eq!(entity.id, "p1");
        assert_eq!(entity.website.as_deref(), Some("https://edinasoccer.org"));
        assert!(entity.phone.is_none());
        assert!(entity.has_place_type("sports_club"));
        assert_eq!(entity.sport, Sport::Soccer);
        assert_eq!(entity.review_count, Some(31));
        assert_eq!(entity.confidence_score, 0);
        assert!(entity.drive_time_minutes.is_none());
    }

    #[test]
    fn test_missing_id() {
        let mut place = RawPlace::new("x", "Name", 1.0, 1.0);
        place.id = Some("  ".to_string());
        assert_eq!(to_entity(place, &Sport::Tennis), Err(ConversionError::MissingId));
    }

    #[test]
    fn test_missing_name() {
        let mut place = RawPlace::new("x", "Name", 1.0, 1.0);
        place.name = None;
        assert!(matches!(
            to_entity(place, &Sport::Tennis),
            Err(ConversionError::MissingName { .. })
        ));
    }

    #[test]
    fn test_invalid_location() {
        let mut place = RawPlace::new("x", "Name", 1.0, 1.0);
        place.location = Some(Coordinates::new(95.0, 10.0));
        assert!(matches!(
            to_entity(place.clone(), &Sport::Tennis),
            Err(ConversionError::InvalidLocation { .. })
        ));
        place.location = None;
        assert!(to_entity(place, &Sport::Tennis).is_err());
    }
}
