//! Secondary entity-type classifier for downstream consumers.
//!
//! The search pipeline never sets [`Entity::entity_type`]; callers that want
//! a coarse label run this over the finished results.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{Entity, EntityType};

/// Confidence at or above which an unlabelled venue is called a club.
pub const CLUB_CONFIDENCE_THRESHOLD: u32 = 3;

const SCHOOL_TYPES: &[&str] = &["school", "primary_school", "secondary_school"];
const COLLEGE_TYPES: &[&str] = &["university", "college"];

lazy_static! {
    static ref COLLEGE_NAME: Regex =
        Regex::new(r"\b(college|university|community college)\b").unwrap();
    static ref SCHOOL_NAME: Regex =
        Regex::new(r"\b(school|high|middle|elementary|academy|prep)\b").unwrap();
    static ref PRIVATE_SCHOOL_NAME: Regex = Regex::new(
        r"\b(academy|prep|preparatory|christian|catholic|lutheran|episcopal|montessori|private|st\.?|saint)\b"
    )
    .unwrap();
}

/// Label an entity from its name, place types and confidence score.
pub fn classify_entity_type(entity: &Entity) -> EntityType {
    let name = entity.name.to_lowercase();

    if entity.has_any_place_type(COLLEGE_TYPES) || COLLEGE_NAME.is_match(&name) {
        return EntityType::College;
    }

    let is_school = entity.has_any_place_type(SCHOOL_TYPES)
        || (SCHOOL_NAME.is_match(&name) && name.contains("school"));
    if is_school {
        return if PRIVATE_SCHOOL_NAME.is_match(&name) {
            EntityType::PrivateSchool
        } else {
            EntityType::PublicSchool
        };
    }

    if entity.confidence_score >= CLUB_CONFIDENCE_THRESHOLD {
        EntityType::Club
    } else {
        EntityType::Unknown
    }
}

/// Label every entity in place.
pub fn classify_all(entities: &mut [Entity]) {
    for entity in entities {
        entity.entity_type = Some(classify_entity_type(entity));
    }
}
