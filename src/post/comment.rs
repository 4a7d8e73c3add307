//! Comments attached to a post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single comment on a post.
///
/// Comments are read-only in this client; they are created and moderated
/// through surfaces this crate does not cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    /// The post this comment belongs to.
    pub post_id: u64,
    pub creator_id: u64,
    #[serde(default)]
    pub creator_name: String,
    pub body: String,
    #[serde(default)]
    pub score: i64,
    pub created_at: DateTime<Utc>,
    /// Hidden comments are kept in the payload for moderators but should not
    /// be shown to regular users.
    #[serde(default)]
    pub is_hidden: bool,
}
