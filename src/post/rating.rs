//! Post content rating.
//!
//! Imageboard posts carry exactly one of three ratings describing how
//! explicit the content is. The wire format uses the single-letter short
//! code; user-facing surfaces and search syntax use the full name. Both
//! spellings resolve through the same case-insensitive lookup.

use std::fmt::Display;

use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

static BY_ANY_NAME: Lazy<AHashMap<&'static str, Rating>> = Lazy::new(|| {
    let mut hmap = AHashMap::with_capacity(6);
    for rating in [Rating::Safe, Rating::Questionable, Rating::Explicit] {
        hmap.insert(rating.name(), rating);
        hmap.insert(rating.short_code(), rating);
    }
    hmap
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    /// Posts that don't involve anything suggestive or sensitive.
    Safe,
    /// Posts with some degree of nudity or sexually suggestive elements.
    Questionable,
    /// Posts with explicit elements of pornography, gore, death, etc.
    Explicit,
}

impl Rating {
    /// The canonical long name, as used in search syntax (`rating:safe`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Questionable => "questionable",
            Self::Explicit => "explicit",
        }
    }

    /// The single-letter code used by the wire format.
    #[must_use]
    pub const fn short_code(self) -> &'static str {
        match self {
            Self::Safe => "s",
            Self::Questionable => "q",
            Self::Explicit => "e",
        }
    }

    /// Resolves a rating from either its long name or its short code,
    /// case-insensitively. A post's rating is always exactly one of the
    /// three variants, so anything else is `None`.
    #[must_use]
    pub fn from_any_name(s: &str) -> Option<Self> {
        BY_ANY_NAME.get(s.to_lowercase().as_str()).copied()
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.short_code())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_any_name(&s)
            .ok_or_else(|| de::Error::unknown_variant(&s, &["s", "q", "e"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_name_resolves_both_spellings() {
        assert_eq!(Rating::from_any_name("e"), Some(Rating::Explicit));
        assert_eq!(Rating::from_any_name("explicit"), Some(Rating::Explicit));
        assert_eq!(
            Rating::from_any_name(&"EXPLICIT".to_lowercase()),
            Some(Rating::Explicit)
        );
        assert_eq!(Rating::from_any_name("Q"), Some(Rating::Questionable));
        assert_eq!(Rating::from_any_name("gibberish"), None);
    }

    #[test]
    fn serializes_as_short_code() {
        assert_eq!(serde_json::to_string(&Rating::Safe).unwrap(), "\"s\"");
        let parsed: Rating = serde_json::from_str("\"q\"").unwrap();
        assert_eq!(parsed, Rating::Questionable);
    }

    #[test]
    fn unknown_rating_is_a_decode_failure() {
        assert!(serde_json::from_str::<Rating>("\"x\"").is_err());
    }
}
