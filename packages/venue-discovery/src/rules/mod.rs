//! Rule-based classifiers: denylist, scoring and entity typing.

pub mod classify;
pub mod exclusion;
pub mod scoring;

pub use classify::{classify_all, classify_entity_type, CLUB_CONFIDENCE_THRESHOLD};
pub use exclusion::{RetailExclusionFilter, RETAIL_CHAIN_FRAGMENTS};
pub use scoring::{
    age_group_scores, confidence_score, primary_age_group, EntityScorer,
    PRIMARY_AGE_GROUP_MIN_SCORE,
};
