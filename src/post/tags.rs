//! Post tag groups.
//!
//! The wire format delivers a post's tags already split into seven disjoint
//! groups (artist, copyright, character, species, general, lore, meta), each
//! an ordered list of strings. [`PostTags`] keeps that grouping and offers a
//! flattened view for blacklist matching and display.

use serde::{Deserialize, Serialize};

/// Categorizes the nature of a tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagType {
    /// Tags identifying the artist(s) of the work.
    Artist,
    /// Tags related to copyright, series, or franchise.
    Copyright,
    /// Tags identifying specific characters depicted.
    Character,
    /// Tags identifying the species of characters.
    Species,
    /// General descriptive tags about the content, scene, or attributes.
    General,
    /// Tags related to lore or setting.
    Lore,
    /// Meta-tags about the post itself (e.g. `animated`, `hi_res`).
    Meta,
}

/// A single tag together with the group it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    tag_type: TagType,
}

impl Tag {
    #[must_use]
    pub fn new(name: &str, tag_type: TagType) -> Self {
        Self {
            name: name.to_string(),
            tag_type,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn tag_type(&self) -> TagType {
        self.tag_type
    }
}

/// A post's tags, grouped the way the server delivers them.
///
/// The groups are disjoint: a tag name appears in exactly one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTags {
    #[serde(default)]
    pub artist: Vec<String>,
    #[serde(default)]
    pub copyright: Vec<String>,
    #[serde(default)]
    pub character: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub general: Vec<String>,
    #[serde(default)]
    pub lore: Vec<String>,
    #[serde(default)]
    pub meta: Vec<String>,
}

impl PostTags {
    /// Total number of tags across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artist.len()
            + self.copyright.len()
            + self.character.len()
            + self.species.len()
            + self.general.len()
            + self.lore.len()
            + self.meta.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any group contains `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|(tag, _)| tag == name)
    }

    /// Iterates over all tags in canonical group order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TagType)> {
        let groups: [(&[String], TagType); 7] = [
            (&self.artist, TagType::Artist),
            (&self.copyright, TagType::Copyright),
            (&self.character, TagType::Character),
            (&self.species, TagType::Species),
            (&self.general, TagType::General),
            (&self.lore, TagType::Lore),
            (&self.meta, TagType::Meta),
        ];
        groups
            .into_iter()
            .flat_map(|(tags, tag_type)| tags.iter().map(move |t| (t.as_str(), tag_type)))
    }

    /// Flattens the groups into a single ordered tag list.
    #[must_use]
    pub fn flatten(&self) -> Vec<Tag> {
        let mut list = Vec::with_capacity(self.len());
        list.extend(self.iter().map(|(name, tag_type)| Tag::new(name, tag_type)));
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PostTags {
        PostTags {
            artist: vec!["some_artist".into()],
            species: vec!["fox".into(), "canine".into()],
            general: vec!["male".into(), "solo".into()],
            meta: vec!["animated".into()],
            ..PostTags::default()
        }
    }

    #[test]
    fn flatten_keeps_group_order() {
        let tags = sample().flatten();
        assert_eq!(tags.len(), 6);
        assert_eq!(tags[0], Tag::new("some_artist", TagType::Artist));
        assert_eq!(tags[1], Tag::new("fox", TagType::Species));
        assert_eq!(tags[5], Tag::new("animated", TagType::Meta));
    }

    #[test]
    fn contains_searches_all_groups() {
        let tags = sample();
        assert!(tags.contains("solo"));
        assert!(tags.contains("animated"));
        assert!(!tags.contains("feline"));
    }
}
