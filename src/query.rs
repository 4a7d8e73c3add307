//! Immutable search query values.
//!
//! A [`SearchOptions`] captures everything that goes into a post search URL:
//! the free-form tag string, a 1-based page number and an optional page size.
//! Deriving a new query from an old one (adding a tag, turning a page) builds
//! a new value instead of mutating in place, so views and history entries can
//! hold on to the query they were created from.

use serde::{Deserialize, Serialize};

/// An immutable post search specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchOptions {
    tags: String,
    page: u32,
    limit: Option<u16>,
}

impl SearchOptions {
    /// A search for the given free-form tag string, starting at page 1 with
    /// the server's default page size.
    #[must_use]
    pub fn new(tags: impl Into<String>) -> Self {
        Self {
            tags: tags.into(),
            page: 1,
            limit: None,
        }
    }

    /// The space-separated tag string.
    #[must_use]
    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The requested page size, `None` meaning the server default.
    #[must_use]
    pub const fn limit(&self) -> Option<u16> {
        self.limit
    }

    /// A copy of this query on another page.
    ///
    /// Page numbers below 1 are clamped to 1.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// A copy of this query with an explicit page size.
    #[must_use]
    pub fn with_limit(&self, limit: u16) -> Self {
        Self {
            limit: Some(limit),
            ..self.clone()
        }
    }

    /// A copy of this query with the limit capped at `max`.
    ///
    /// Queries without an explicit limit are left alone; the server applies
    /// its own default.
    #[must_use]
    pub fn clamp_limit(&self, max: u16) -> Self {
        match self.limit {
            Some(limit) if limit > max => Self {
                limit: Some(max),
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    /// A copy of this query with `tag` appended, unless already present.
    ///
    /// Adding a tag resets the page back to 1: the result set changes, so the
    /// old pagination cursor is meaningless.
    #[must_use]
    pub fn with_tag(&self, tag: &str) -> Self {
        if self.tag_tokens().any(|t| t == tag) {
            return self.clone();
        }
        let tags = if self.tags.is_empty() {
            tag.to_string()
        } else {
            format!("{} {}", self.tags, tag)
        };
        Self {
            tags,
            page: 1,
            limit: self.limit,
        }
    }

    /// A copy of this query with every occurrence of `tag` removed.
    ///
    /// Like [`with_tag`](Self::with_tag), resets the page to 1.
    #[must_use]
    pub fn without_tag(&self, tag: &str) -> Self {
        let tags = self
            .tag_tokens()
            .filter(|t| *t != tag)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            tags,
            page: 1,
            limit: self.limit,
        }
    }

    fn tag_tokens(&self) -> impl Iterator<Item = &str> {
        self.tags.split_whitespace()
    }

    /// The query pairs for the search endpoint, in a fixed order.
    ///
    /// Percent-encoding is left to the request builder.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("tags", self.tags.clone())];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs
    }

    /// Rebuilds a query from decoded query pairs, the inverse of
    /// [`query_pairs`](Self::query_pairs). Unknown keys are ignored,
    /// unparseable numbers fall back to the defaults.
    #[must_use]
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::new("");
        for (key, value) in pairs {
            match key {
                "tags" => options.tags = value.to_string(),
                "page" => options.page = value.parse::<u32>().unwrap_or(1).max(1),
                "limit" => options.limit = value.parse().ok(),
                _ => {}
            }
        }
        options
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_round_trip() {
        let options = SearchOptions::new("fox male").with_page(2).with_limit(50);

        let pairs = options.query_pairs();
        let decoded = SearchOptions::from_query_pairs(
            pairs.iter().map(|(k, v)| (*k, v.as_str())),
        );

        assert_eq!(decoded, options);
        assert_eq!(decoded.tags(), "fox male");
        assert_eq!(decoded.page(), 2);
        assert_eq!(decoded.limit(), Some(50));
    }

    #[test]
    fn with_tag_builds_a_new_value() {
        let base = SearchOptions::new("fox").with_page(4);
        let derived = base.with_tag("male");

        assert_eq!(base.tags(), "fox");
        assert_eq!(base.page(), 4);
        assert_eq!(derived.tags(), "fox male");
        assert_eq!(derived.page(), 1);
    }

    #[test]
    fn with_tag_is_idempotent() {
        let base = SearchOptions::new("fox male");
        assert_eq!(base.with_tag("male").tags(), "fox male");
    }

    #[test]
    fn without_tag_removes_only_that_tag() {
        let base = SearchOptions::new("fox male solo");
        assert_eq!(base.without_tag("male").tags(), "fox solo");
        assert_eq!(base.without_tag("absent").tags(), "fox male solo");
    }

    #[test]
    fn clamp_limit_caps_only_oversized_limits() {
        let base = SearchOptions::new("fox");
        assert_eq!(base.with_limit(5000).clamp_limit(320).limit(), Some(320));
        assert_eq!(base.with_limit(100).clamp_limit(320).limit(), Some(100));
        assert_eq!(base.clamp_limit(320).limit(), None);
    }

    #[test]
    fn page_is_clamped_to_one() {
        assert_eq!(SearchOptions::new("fox").with_page(0).page(), 1);
    }
}
