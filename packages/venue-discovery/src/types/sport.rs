use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sport category a search runs under.
///
/// Well-known sports get their own variant so keyword expansion can add
/// sport-specific phrasing; anything else is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sport {
    Basketball,
    Volleyball,
    Soccer,
    Baseball,
    Softball,
    Football,
    Hockey,
    Lacrosse,
    Swimming,
    Tennis,
    Wrestling,
    TrackAndField,
    Gymnastics,
    Other(String),
}

impl Sport {
    /// Lowercase display name, also used as search text.
    pub fn name(&self) -> &str {
        match self {
            Sport::Basketball => "basketball",
            Sport::Volleyball => "volleyball",
            Sport::Soccer => "soccer",
            Sport::Baseball => "baseball",
            Sport::Softball => "softball",
            Sport::Football => "football",
            Sport::Hockey => "hockey",
            Sport::Lacrosse => "lacrosse",
            Sport::Swimming => "swimming",
            Sport::Tennis => "tennis",
            Sport::Wrestling => "wrestling",
            Sport::TrackAndField => "track and field",
            Sport::Gymnastics => "gymnastics",
            Sport::Other(name) => name,
        }
    }

    /// True for an `Other` with nothing searchable in it.
    pub fn is_blank(&self) -> bool {
        self.name().trim().is_empty()
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sport {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let sport = match normalized.as_str() {
            "basketball" => Sport::Basketball,
            "volleyball" => Sport::Volleyball,
            "soccer" | "futbol" => Sport::Soccer,
            "baseball" => Sport::Baseball,
            "softball" => Sport::Softball,
            "football" => Sport::Football,
            "hockey" | "ice hockey" => Sport::Hockey,
            "lacrosse" => Sport::Lacrosse,
            "swimming" | "swim" => Sport::Swimming,
            "tennis" => Sport::Tennis,
            "wrestling" => Sport::Wrestling,
            "track" | "track and field" | "track & field" => Sport::TrackAndField,
            "gymnastics" => Sport::Gymnastics,
            _ => Sport::Other(normalized),
        };
        Ok(sport)
    }
}

impl From<String> for Sport {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(sport) => sport,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Sport {
    fn from(s: &str) -> Self {
        Sport::from(s.to_string())
    }
}

impl From<Sport> for String {
    fn from(sport: Sport) -> Self {
        sport.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Sport::from("  Volleyball "), Sport::Volleyball);
        assert_eq!(Sport::from("Track & Field"), Sport::TrackAndField);
    }

    #[test]
    fn test_unknown_sport_is_kept() {
        let sport = Sport::from("Ultimate Frisbee");
        assert_eq!(sport, Sport::Other("ultimate frisbee".to_string()));
        assert_eq!(sport.to_string(), "ultimate frisbee");
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Sport::TrackAndField).unwrap();
        assert_eq!(json, r#""track and field""#);
        let back: Sport = serde_json::from_str(r#""Soccer""#).unwrap();
        assert_eq!(back, Sport::Soccer);
    }

    #[test]
    fn test_blank_other() {
        assert!(Sport::from("   ").is_blank());
        assert!(!Sport::Hockey.is_blank());
    }
}
