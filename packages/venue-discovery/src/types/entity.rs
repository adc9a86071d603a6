//! The candidate venue and its scores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::location::Coordinates;
use super::sport::Sport;

/// Coarse venue classification, assigned downstream of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Club,
    #[serde(rename = "Public School")]
    PublicSchool,
    #[serde(rename = "Private School")]
    PrivateSchool,
    College,
    Unknown,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityType::Club => "Club",
            EntityType::PublicSchool => "Public School",
            EntityType::PrivateSchool => "Private School",
            EntityType::College => "College",
            EntityType::Unknown => "Unknown",
        })
    }
}

/// Age bucket an entity may serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeGroup {
    Youth,
    HighSchool,
    Adult,
    Elite,
}

impl AgeGroup {
    /// Declaration order; ties for the primary group resolve to the earliest.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Youth,
        AgeGroup::HighSchool,
        AgeGroup::Adult,
        AgeGroup::Elite,
    ];
}

/// Per-bucket scores. Unsigned, so never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupScores {
    pub youth: u32,
    pub high_school: u32,
    pub adult: u32,
    pub elite: u32,
}

impl AgeGroupScores {
    pub fn get(&self, group: AgeGroup) -> u32 {
        match group {
            AgeGroup::Youth => self.youth,
            AgeGroup::HighSchool => self.high_school,
            AgeGroup::Adult => self.adult,
            AgeGroup::Elite => self.elite,
        }
    }

    pub fn add(&mut self, group: AgeGroup, points: u32) {
        let slot = match group {
            AgeGroup::Youth => &mut self.youth,
            AgeGroup::HighSchool => &mut self.high_school,
            AgeGroup::Adult => &mut self.adult,
            AgeGroup::Elite => &mut self.elite,
        };
        *slot = slot.saturating_add(points);
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgeGroup, u32)> + '_ {
        AgeGroup::ALL.into_iter().map(|g| (g, self.get(g)))
    }
}

/// A discovered candidate venue.
///
/// Created once per search hit and filled in as it moves through scoring,
/// containment and routing. Drive data stays `None` until routing succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Search provider id; the dedupe key.
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Coordinates,
    /// Normalized provider tags (`sports_club`, `school`, ...).
    pub place_types: BTreeSet<String>,
    /// Sport whose keyword first surfaced this entity.
    pub sport: Sport,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub confidence_score: u32,
    pub age_group_scores: AgeGroupScores,
    pub primary_age_group: Option<AgeGroup>,
    pub drive_time_minutes: Option<u32>,
    pub distance_miles: Option<f64>,
    pub entity_type: Option<EntityType>,
}

impl Entity {
    /// A bare entity with no scores or drive data.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coordinates,
        sport: Sport,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            phone: None,
            website: None,
            location,
            place_types: BTreeSet::new(),
            sport,
            rating: None,
            review_count: None,
            confidence_score: 0,
            age_group_scores: AgeGroupScores::default(),
            primary_age_group: None,
            drive_time_minutes: None,
            distance_miles: None,
            entity_type: None,
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_place_type(mut self, place_type: &str) -> Self {
        self.place_types.insert(normalize_place_type(place_type));
        self
    }

    pub fn with_review_count(mut self, count: u32) -> Self {
        self.review_count = Some(count);
        self
    }

    pub fn has_place_type(&self, place_type: &str) -> bool {
        self.place_types.contains(place_type)
    }

    pub fn has_any_place_type(&self, place_types: &[&str]) -> bool {
        place_types.iter().any(|t| self.has_place_type(t))
    }

    /// Website with surrounding whitespace removed, if non-empty.
    pub fn website_text(&self) -> Option<&str> {
        self.website
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }

    /// Record a verified route.
    pub fn attach_route(&mut self, minutes: u32, miles: f64) {
        self.drive_time_minutes = Some(minutes);
        self.distance_miles = Some(miles);
    }
}

/// Lowercase a provider tag and join its words with underscores, so that
/// `"Sports Facility"`, `"sports-facility"` and `"sports_facility"` agree.
pub fn normalize_place_type(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
