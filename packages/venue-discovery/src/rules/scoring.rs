//! Rule-based confidence and age-group scoring.
//!
//! Pure functions over an [`Entity`]'s name, website and place types. No
//! external calls; the ruleset is fixed at compile time.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{AgeGroup, AgeGroupScores, Entity};

/// Minimum score the leading age group needs before it is reported.
pub const PRIMARY_AGE_GROUP_MIN_SCORE: u32 = 2;

/// Reviews beyond which a venue is assumed to draw a general adult audience.
pub const POPULAR_REVIEW_COUNT: u32 = 50;

const SPORTS_FACILITY_TYPES: &[&str] = &[
    "sports_facility",
    "sports_complex",
    "sports_club",
    "sports_activity_location",
    "athletic_field",
    "stadium",
];
const SCHOOL_TYPES: &[&str] = &["school", "primary_school", "secondary_school"];
const NON_CLUB_TYPES: &[&str] = &["restaurant", "bar", "gym", "fitness_center"];
const HOSPITALITY_TYPES: &[&str] = &["bar", "restaurant"];

lazy_static! {
    static ref CLUB_NAME: Regex = Regex::new(r"\b(academy|club|select|travel|juniors?)\b").unwrap();
    static ref VENUE_NAME: Regex = Regex::new(r"\b(bar|restaurant|grill|pub)\b").unwrap();
    static ref PROGRAM_LANGUAGE: Regex =
        Regex::new(r"\b(?:[6-9]|1[0-9])u\b|\bu(?:[6-9]|1[0-9])\b|tryouts?|roster").unwrap();
    static ref AGE_KEYWORDS: Vec<(AgeGroup, Regex)> = [
        (AgeGroup::Youth, r"\byouth\b"),
        (AgeGroup::Youth, r"\bjuniors?\b"),
        (AgeGroup::Youth, r"\b(?:[89]|1[0-4])u\b"),
        (AgeGroup::Youth, r"\bu(?:[89]|1[0-4])\b"),
        (AgeGroup::HighSchool, r"\b1[5-8]u\b"),
        (AgeGroup::HighSchool, r"\bu1[5-8]\b"),
        (AgeGroup::HighSchool, r"\bvarsity\b"),
        (AgeGroup::HighSchool, r"\bhigh[\s-]?school\b"),
        (AgeGroup::Adult, r"\badults?\b"),
        (AgeGroup::Adult, r"\bopen\b"),
        (AgeGroup::Adult, r"\brec(?:reation(?:al)?)?\b"),
        (AgeGroup::Elite, r"\belite\b"),
        (AgeGroup::Elite, r"\bacademy\b"),
        (AgeGroup::Elite, r"\bperformance\b"),
        (AgeGroup::Elite, r"\bcollege[\s-]?prep\b"),
    ]
    .into_iter()
    .map(|(group, pattern)| (group, Regex::new(pattern).unwrap()))
    .collect();
}

/// Scores entities. Stateless; kept as a type so callers can hold one next
/// to the other pipeline stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityScorer;

impl EntityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Fill in confidence, age-group scores and the primary age group.
    pub fn apply(&self, entity: &mut Entity) {
        entity.confidence_score = confidence_score(entity);
        entity.age_group_scores = age_group_scores(entity);
        entity.primary_age_group = primary_age_group(&entity.age_group_scores);
    }
}

/// How strongly an entity looks like a genuine club or program.
///
/// Floor-clamped at zero, no ceiling.
pub fn confidence_score(entity: &Entity) -> u32 {
    let name = entity.name.to_lowercase();
    let mut score: i32 = 0;

    if CLUB_NAME.is_match(&name) {
        score += 3;
    }
    if VENUE_NAME.is_match(&name) {
        score -= 3;
    }

    if entity.has_any_place_type(SPORTS_FACILITY_TYPES) {
        score += 2;
    }
    if entity.has_any_place_type(SCHOOL_TYPES) {
        score += 1;
    }
    if entity.has_any_place_type(NON_CLUB_TYPES) {
        score -= 2;
    }

    if let Some(website) = entity.website_text() {
        score += 2;
        if PROGRAM_LANGUAGE.is_match(&website.to_lowercase()) {
            score += 2;
        }
    }

    score.max(0) as u32
}

/// Independent per-bucket scores from name, website and place types.
///
/// Every distinct keyword that matches adds 3 to its bucket.
pub fn age_group_scores(entity: &Entity) -> AgeGroupScores {
    let text = match entity.website_text() {
        Some(website) => format!("{} {}", entity.name, website),
        None => entity.name.clone(),
    }
    .to_lowercase();

    let mut scores = AgeGroupScores::default();

    for (group, pattern) in AGE_KEYWORDS.iter() {
        if pattern.is_match(&text) {
            scores.add(*group, 3);
        }
    }

    if entity.has_any_place_type(SCHOOL_TYPES) {
        scores.add(AgeGroup::HighSchool, 2);
    }
    if entity.has_any_place_type(SPORTS_FACILITY_TYPES) {
        scores.add(AgeGroup::Youth, 1);
        scores.add(AgeGroup::Elite, 1);
    }
    if entity.has_any_place_type(HOSPITALITY_TYPES) {
        scores.add(AgeGroup::Adult, 2);
    }

    if entity.review_count.unwrap_or(0) > POPULAR_REVIEW_COUNT {
        scores.add(AgeGroup::Adult, 1);
    }

    scores
}

/// The highest-scoring bucket, if it clears the noise threshold. Ties go to
/// the bucket declared first in [`AgeGroup::ALL`].
pub fn primary_age_group(scores: &AgeGroupScores) -> Option<AgeGroup> {
    let (group, best) = scores
        .iter()
        .fold(None, |best: Option<(AgeGroup, u32)>, (group, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((group, score)),
        })?;

    (best >= PRIMARY_AGE_GROUP_MIN_SCORE).then_some(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, Sport};
    use proptest::prelude::*;

    fn entity(name: &str) -> Entity {
        Entity::new("id", name, Coordinates::new(44.9, -93.2), Sport::Volleyball)
    }

    #[test]
    fn test_elite_academy_scenario() {
        let mut e = entity("Elite Volleyball Academy")
            .with_website("https://elitevball.com/12u-travel")
            .with_place_type("sports facility");
        EntityScorer::new().apply(&mut e);

        assert!(e.confidence_score >= 7, "got {}", e.confidence_score);
        assert!(e.age_group_scores.elite >= 3);
        assert_eq!(e.primary_age_group, Some(AgeGroup::Elite));
    }

    #[test]
    fn test_confidence_components() {
        // club name +3, sports facility +2, website +2, tryouts +2
        let e = entity("Northside Juniors")
            .with_place_type("sports_complex")
            .with_website("https://northside.org/tryouts");
        assert_eq!(confidence_score(&e), 9);

        // school +1 only
        let e = entity("Roosevelt High").with_place_type("school");
        assert_eq!(confidence_score(&e), 1);
    }

    #[test]
    fn test_confidence_is_floor_clamped() {
        let e = entity("Sports Bar and Grill")
            .with_place_type("bar")
            .with_place_type("restaurant");
        assert_eq!(confidence_score(&e), 0);
    }

    #[test]
    fn test_venue_words_need_word_boundaries() {
        // "barbell" must not read as "bar"
        let e = entity("Barbell Club");
        assert_eq!(confidence_score(&e), 3);
    }

    #[test]
    fn test_generic_gym_penalized() {
        let e = entity("Anytime Fitness")
            .with_place_type("gym")
            .with_website("https://anytimefitness.com");
        assert_eq!(confidence_score(&e), 0);
    }

    #[test]
    fn test_age_groups_from_types_and_reviews() {
        let e = entity("Lakeside Tavern")
            .with_place_type("bar")
            .with_review_count(420);
        let scores = age_group_scores(&e);
        assert_eq!(scores.adult, 3);
        assert_eq!(scores.youth, 0);
        assert_eq!(primary_age_group(&scores), Some(AgeGroup::Adult));
    }

    #[test]
    fn test_school_leans_high_school() {
        let e = entity("Central High School").with_place_type("school");
        let scores = age_group_scores(&e);
        assert_eq!(scores.high_school, 5);
        assert_eq!(primary_age_group(&scores), Some(AgeGroup::HighSchool));
    }

    #[test]
    fn test_primary_needs_threshold() {
        let scores = AgeGroupScores {
            youth: 1,
            ..Default::default()
        };
        assert_eq!(primary_age_group(&scores), None);
        assert_eq!(primary_age_group(&AgeGroupScores::default()), None);
    }

    #[test]
    fn test_primary_tie_goes_to_first_declared() {
        let scores = AgeGroupScores {
            youth: 4,
            high_school: 0,
            adult: 4,
            elite: 4,
        };
        assert_eq!(primary_age_group(&scores), Some(AgeGroup::Youth));
    }

    proptest! {
        #[test]
        fn prop_primary_group_is_a_maximum(
            youth in 0u32..20, high_school in 0u32..20, adult in 0u32..20, elite in 0u32..20
        ) {
            let scores = AgeGroupScores { youth, high_school, adult, elite };
            let max = youth.max(high_school).max(adult).max(elite);
            match primary_age_group(&scores) {
                Some(group) => {
                    prop_assert_eq!(scores.get(group), max);
                    prop_assert!(max >= PRIMARY_AGE_GROUP_MIN_SCORE);
                }
                None => prop_assert!(max < PRIMARY_AGE_GROUP_MIN_SCORE),
            }
        }

        #[test]
        fn prop_scoring_never_panics(
            name in "[a-zA-Z0-9 '&-]{0,40}",
            website in proptest::option::of("[a-z0-9:/.-]{0,40}"),
            reviews in proptest::option::of(0u32..1000),
        ) {
            let mut e = entity(&name);
            e.website = website;
            e.review_count = reviews;
            EntityScorer::new().apply(&mut e);
            let scores = e.age_group_scores;
            prop_assert!(e.primary_age_group.map_or(true, |g| scores.get(g) >= PRIMARY_AGE_GROUP_MIN_SCORE));
        }
    }
}
