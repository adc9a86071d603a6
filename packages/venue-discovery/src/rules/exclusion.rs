//! Retail chain denylist.
//!
//! A hit whose name or website contains any fragment is dropped before it
//! is scored, whatever the score would have been.

use crate::types::Entity;

/// Known sporting-goods retail chains, lowercase, matched as substrings.
pub const RETAIL_CHAIN_FRAGMENTS: &[&str] = &[
    "dick's sporting goods",
    "dicks sporting goods",
    "dickssportinggoods",
    "academy sports + outdoors",
    "academy sports and outdoors",
    "academysports",
    "big 5 sporting goods",
    "big5sportinggoods",
    "scheels",
    "hibbett",
    "dunham's sports",
    "dunhamssports",
    "modell's sporting goods",
    "play it again sports",
    "playitagainsports",
    "sports authority",
    "decathlon",
    "bass pro shops",
    "basspro.com",
    "cabela's",
    "cabelas.com",
    "foot locker",
    "footlocker",
    "champs sports",
    "champssports",
    "rei co-op",
    "rei.com",
    "sport chalet",
    "fleet farm",
];

#[derive(Debug, Clone)]
pub struct RetailExclusionFilter {
    fragments: Vec<String>,
}

impl Default for RetailExclusionFilter {
    fn default() -> Self {
        Self::with_fragments(RETAIL_CHAIN_FRAGMENTS.iter().copied())
    }
}

impl RetailExclusionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the denylist.
    pub fn with_fragments(fragments: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            fragments: fragments
                .into_iter()
                .map(|f| normalize(f.as_ref()))
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// The first denylist fragment found in the entity's name or website.
    pub fn matched_fragment(&self, entity: &Entity) -> Option<&str> {
        let name = normalize(&entity.name);
        let website = entity.website.as_deref().map(normalize).unwrap_or_default();

        self.fragments
            .iter()
            .find(|f| name.contains(f.as_str()) || website.contains(f.as_str()))
            .map(String::as_str)
    }

    pub fn is_excluded(&self, entity: &Entity) -> bool {
        self.matched_fragment(entity).is_some()
    }
}

/// Lowercase and fold typographic apostrophes so "Dick’s" matches "dick's".
fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}', '`'], "'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, Sport};

    fn entity(name: &str) -> Entity {
        Entity::new("id", name, Coordinates::new(40.0, -75.0), Sport::Basketball)
    }

    #[test]
    fn test_chain_name_excluded() {
        let filter = RetailExclusionFilter::new();
        assert!(filter.is_excluded(&entity("DICK'S Sporting Goods")));
        assert!(filter.is_excluded(&entity("Dick’s Sporting Goods - Eden Prairie")));
        assert!(filter.is_excluded(&entity("SCHEELS")));
    }

    #[test]
    fn test_chain_website_excluded() {
        let filter = RetailExclusionFilter::new();
        let e = entity("Store #1142").with_website("https://stores.dickssportinggoods.com/mn/");
        assert_eq!(filter.matched_fragment(&e), Some("dickssportinggoods"));
    }

    #[test]
    fn test_clubs_not_excluded() {
        let filter = RetailExclusionFilter::new();
        assert!(!filter.is_excluded(&entity("Elite Volleyball Academy")));
        assert!(!filter.is_excluded(&entity("Reid Park Tennis Club")));
        assert!(!filter
            .is_excluded(&entity("Minnesota Select").with_website("https://mnselect.org/tryouts")));
    }

    #[test]
    fn test_custom_fragments_replace_defaults() {
        let filter = RetailExclusionFilter::with_fragments(["Sports Barn", "  "]);
        assert!(filter.is_excluded(&entity("The Sports Barn Outlet")));
        assert!(!filter.is_excluded(&entity("Scheels")));
    }
}
