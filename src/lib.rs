//! Async client library for e621-compatible imageboard (Booru) REST APIs.
//!
//! # Overview
//! The crate is a thin, explicit pipeline over the service's JSON REST API:
//! a request builder, a rate limiter honoring the server's usage policy, and
//! a response mapper turning payloads into typed records. No global state:
//! every [`Client`] is a constructible instance holding its own credentials
//! and configuration.
//!
//! ```no_run
//! use imageboard_api::{Client, SearchOptions, ServerConfig};
//!
//! # async fn run() -> Result<(), imageboard_api::ApiError> {
//! let client = Client::new(ServerConfig::default())?;
//!
//! if client.check_credentials("some_user", "api_key").await? {
//!     let query = SearchOptions::new("fox male").with_limit(50);
//!     for post in client.search_posts(&query).await? {
//!         println!("#{} [{}]", post.id, post.rating);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Operations suspend the caller for the whole round trip (network plus any
//! rate-limiter wait); dropping the future cancels the in-flight request.
//! Nothing is retried internally, retry policy belongs to the caller.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod net;
pub mod post;
pub mod query;

pub use auth::{CredentialStore, Credentials};
pub use client::Client;
pub use config::{ServerConfig, DEFAULT_SERVERS};
pub use error::ApiError;
pub use net::RateLimiter;
pub use post::comment::Comment;
pub use post::rating::Rating;
pub use post::tags::{PostTags, Tag, TagType};
pub use post::{FileVariant, MediaKind, Post, Score, VoteResult};
pub use query::SearchOptions;
