//! Deduplication and ranking of pipeline survivors.

use std::collections::HashSet;

use crate::types::Entity;

/// Combines survivors from every keyword into the response list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAggregator;

impl ResultAggregator {
    /// Keep the first occurrence of each id, in input order.
    ///
    /// Input order is keyword/sport priority order, so the first keyword to
    /// surface an id decides the canonical entity's `sport`.
    pub fn dedupe(entities: Vec<Entity>) -> Vec<Entity> {
        let mut seen: HashSet<String> = HashSet::with_capacity(entities.len());
        entities
            .into_iter()
            .filter(|e| seen.insert(e.id.clone()))
            .collect()
    }

    /// Order by confidence, highest first. Stable, so equal scores keep
    /// their dedupe order.
    pub fn rank(entities: &mut [Entity]) {
        entities.sort_by(|a, b| b.confidence_score.cmp(&a.confidence_score));
    }

    /// Dedupe then rank.
    pub fn finalize(entities: Vec<Entity>) -> Vec<Entity> {
        let mut unique = Self::dedupe(entities);
        Self::rank(&mut unique);
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, Sport};
    use proptest::prelude::*;

    fn entity(id: &str, sport: Sport, score: u32) -> Entity {
        let mut e = Entity::new(id, format!("Venue {}", id), Coordinates::new(0.0, 0.0), sport);
        e.confidence_score = score;
        e
    }

    #[test]
    fn test_first_occurrence_wins() {
        let deduped = ResultAggregator::dedupe(vec![
            entity("a", Sport::Soccer, 1),
            entity("b", Sport::Soccer, 1),
            entity("a", Sport::Lacrosse, 9),
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, "a");
        assert_eq!(deduped[0].sport, Sport::Soccer);
        assert_eq!(deduped[0].confidence_score, 1);
    }

    #[test]
    fn test_rank_is_stable() {
        let ranked = ResultAggregator::finalize(vec![
            entity("low", Sport::Soccer, 1),
            entity("first", Sport::Soccer, 5),
            entity("second", Sport::Soccer, 5),
        ]);
        let ids: Vec<_> = ranked.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "low"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(ResultAggregator::finalize(Vec::new()).is_empty());
    }

    proptest! {
        #[test]
        fn prop_dedupe_is_idempotent(ids in proptest::collection::vec("[a-e]", 0..30)) {
            let entities: Vec<Entity> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| entity(id, Sport::Soccer, i as u32))
                .collect();

            let once = ResultAggregator::dedupe(entities);
            let twice = ResultAggregator::dedupe(once.clone());
            prop_assert_eq!(&once, &twice);

            let unique: HashSet<&str> = once.iter().map(|e| e.id.as_str()).collect();
            prop_assert_eq!(unique.len(), once.len());
        }
    }
}
