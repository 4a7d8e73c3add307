//! Wire envelopes for the individual endpoints.
//!
//! The post endpoints wrap their payload in a single-key object; the user
//! endpoint is consumed both by the credential probe and by the blacklist
//! fetch, so it keeps the profile fields both need.

use serde::Deserialize;

use crate::post::comment::Comment;
use crate::post::Post;

#[derive(Debug, Deserialize)]
pub(crate) struct PostsEndpoint {
    pub posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostEndpoint {
    pub post: Post,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsEndpoint {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Profile payload of `GET /users/{name}.json`.
///
/// `blacklisted_tags` is a single newline-separated string in the profile,
/// split into individual rules by the caller.
#[derive(Debug, Deserialize)]
pub(crate) struct UserEndpoint {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub blacklisted_tags: Option<String>,
}
