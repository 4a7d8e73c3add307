//! Main representation of an imageboard post.
//!
//! # Post
//! A [`Post`] is deserialized straight from the server's JSON and is
//! otherwise an immutable value object. It carries the file variants
//! (original, sample, preview), the rating, the grouped tag lists and the
//! vote/favorite state the gallery needs.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use self::rating::Rating;
use self::tags::PostTags;

pub mod comment;
pub mod rating;
pub mod tags;

/// Rough media classification of a file variant, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
    /// Flash, archives and anything else the viewer can't render inline.
    Other,
}

impl MediaKind {
    /// Guesses the kind from a file extension, case-insensitively.
    ///
    /// Never fails; unrecognized extensions are [`MediaKind::Other`].
    #[must_use]
    pub fn guess_format(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "jfif" | "png" | "apng" | "webp" | "gif" | "avif" | "jxl" => {
                Self::Image
            }
            "webm" | "mp4" => Self::Video,
            _ => Self::Other,
        }
    }
}

/// One of the file renditions of a post (original, sample or preview).
///
/// Deleted posts keep their metadata but lose the URL, so `url` is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVariant {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// Only the original variant carries an explicit extension; the sample
    /// and preview guess theirs from the URL.
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl FileVariant {
    /// The file extension, from the explicit field or the URL suffix.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        if let Some(ext) = &self.ext {
            return Some(ext);
        }
        self.url.as_deref().and_then(|url| url.rsplit('.').next())
    }

    /// Media classification of this variant.
    #[must_use]
    pub fn media(&self) -> MediaKind {
        self.extension().map_or(MediaKind::Other, MediaKind::guess_format)
    }
}

/// Up/down/total score of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub up: i64,
    #[serde(default)]
    pub down: i64,
    #[serde(default)]
    pub total: i64,
}

/// The outcome of a vote operation: the post's resulting score and the
/// caller's current vote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub up: i64,
    pub down: i64,
    /// Resulting total score.
    pub score: i64,
    /// The caller's vote after the operation: 1, -1, or 0 when the vote was
    /// toggled back to neutral.
    pub our_score: i64,
}

/// A single media entry on the imageboard.
#[derive(Clone, Debug, Serialize, Deserialize, Eq)]
pub struct Post {
    /// ID number of the post given by the imageboard.
    pub id: u64,
    pub created_at: DateTime<Utc>,
    /// The original uploaded file.
    pub file: FileVariant,
    /// A downscaled rendition for gallery viewing.
    #[serde(default)]
    pub sample: FileVariant,
    /// The thumbnail.
    #[serde(default)]
    pub preview: FileVariant,
    pub rating: Rating,
    pub tags: PostTags,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub fav_count: u64,
    /// Whether the authenticated user has favorited this post.
    #[serde(default)]
    pub is_favorited: bool,
    #[serde(default)]
    pub comment_count: u64,
}

impl Post {
    /// MD5 hash of the original file as reported by the API.
    #[must_use]
    pub fn md5(&self) -> Option<&str> {
        self.file.md5.as_deref()
    }

    /// Whether the original file is a video.
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.file.media() == MediaKind::Video
    }
}

impl Ord for Post {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for Post {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_classification() {
        assert_eq!(MediaKind::guess_format("jpg"), MediaKind::Image);
        assert_eq!(MediaKind::guess_format("PNG"), MediaKind::Image);
        assert_eq!(MediaKind::guess_format("webm"), MediaKind::Video);
        assert_eq!(MediaKind::guess_format("swf"), MediaKind::Other);
    }

    #[test]
    fn variant_extension_falls_back_to_url() {
        let variant = FileVariant {
            url: Some("https://static1.e621.net/data/sample/ab/cd/abcd.webm".to_string()),
            ..FileVariant::default()
        };
        assert_eq!(variant.extension(), Some("webm"));
        assert_eq!(variant.media(), MediaKind::Video);
    }

    #[test]
    fn post_deserializes_from_wire_json() {
        let raw = r#"{
            "id": 12345,
            "created_at": "2023-01-15T10:30:00Z",
            "file": {"width": 1280, "height": 720, "ext": "png", "md5": "d41d8cd98f00b204e9800998ecf8427e", "url": "https://static1.e621.net/data/d4/1d/d41d.png"},
            "sample": {"has": true, "width": 850, "height": 478, "url": "https://static1.e621.net/data/sample/d4/1d/d41d.jpg"},
            "preview": {"width": 150, "height": 84, "url": null},
            "rating": "s",
            "tags": {"general": ["solo"], "species": ["fox"], "artist": [], "copyright": [], "character": [], "lore": [], "meta": []},
            "score": {"up": 10, "down": -2, "total": 8},
            "fav_count": 42,
            "is_favorited": true,
            "comment_count": 3
        }"#;

        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.id, 12345);
        assert_eq!(post.rating, Rating::Safe);
        assert_eq!(post.md5(), Some("d41d8cd98f00b204e9800998ecf8427e"));
        assert_eq!(post.file.media(), MediaKind::Image);
        assert_eq!(post.score.total, 8);
        assert!(post.is_favorited);
        assert!(post.tags.contains("fox"));
    }
}
