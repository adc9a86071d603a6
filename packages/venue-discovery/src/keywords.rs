//! Sport category to search phrase expansion.
//!
//! Phrases run from club-intent ("youth soccer club") to generic
//! ("soccer"). Specific phrasing is precise but sparse; generic phrasing
//! recalls more but pulls in restaurants and gyms. The pipeline searches
//! every phrase, in order, so first-seen priority favors precise hits.

use crate::types::Sport;

/// Default templates, most specific first. `{sport}` is replaced with the
/// sport's display name.
pub const DEFAULT_TEMPLATES: &[&str] = &[
    "youth {sport} club",
    "{sport} club",
    "travel {sport} team",
    "{sport} academy",
    "{sport} training",
    "{sport} league",
    "{sport}",
];

#[derive(Debug, Clone)]
pub struct KeywordExpander {
    templates: Vec<String>,
}

impl Default for KeywordExpander {
    fn default() -> Self {
        Self::with_templates(DEFAULT_TEMPLATES.iter().copied())
    }
}

impl KeywordExpander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the generic templates. Sport-specific phrases are still added.
    pub fn with_templates(templates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| t.into()).collect(),
        }
    }

    /// Ordered, duplicate-free search phrases for a sport.
    ///
    /// Sport-specific club phrasing goes right after the first template.
    pub fn expand(&self, sport: &Sport) -> Vec<String> {
        let name = sport.name().trim();
        let mut generic = self.templates.iter().map(|t| t.replace("{sport}", name));

        let mut phrases: Vec<String> = Vec::new();
        phrases.extend(generic.next());
        phrases.extend(sport_specific(sport).iter().map(|p| p.to_string()));
        phrases.extend(generic);

        let mut seen = std::collections::HashSet::new();
        phrases.retain(|p| !p.trim().is_empty() && seen.insert(p.to_lowercase()));
        phrases
    }

    /// The single broad phrase used when every keyword came back empty.
    pub fn fallback_query(&self, sport: &Sport) -> String {
        sport.name().trim().to_string()
    }
}

fn sport_specific(sport: &Sport) -> &'static [&'static str] {
    match sport {
        Sport::Basketball => &["AAU basketball team"],
        Sport::Volleyball => &["club volleyball", "juniors volleyball club"],
        Sport::Soccer => &["soccer FC", "youth soccer association"],
        Sport::Baseball => &["select baseball team"],
        Sport::Softball => &["fastpitch softball club"],
        Sport::Football => &["youth football association"],
        Sport::Hockey => &["youth hockey association"],
        Sport::Lacrosse => &["youth lacrosse association"],
        Sport::Swimming => &["swim team", "aquatics club"],
        Sport::Tennis => &["junior tennis academy"],
        Sport::Wrestling => &["youth wrestling club"],
        Sport::TrackAndField => &["youth track club", "running club"],
        Sport::Gymnastics => &["gymnastics gym", "gymnastics team"],
        Sport::Other(_) => &[],
    }
}
