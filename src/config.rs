//! Server presets and per-instance client configuration.
//!
//! A [`ServerConfig`] pins everything the client needs to know about a remote
//! imageboard at construction time: base URL, user agent, page size cap and
//! the minimum spacing between requests the server's usage policy asks for.

use std::collections::HashMap;
use std::fmt::Display;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_UA: &str = concat!(
    "Rust Imageboard API Client/",
    env!("CARGO_PKG_VERSION")
);

/// Minimum spacing between outbound requests mandated by the e621 usage
/// policy (hard limit is 2 requests per second, sustained use should stay
/// below it).
pub const E621_REQUEST_INTERVAL: Duration = Duration::from_millis(1500);

/// Preset configurations for the known e621-compatible servers.
pub static DEFAULT_SERVERS: Lazy<HashMap<String, ServerConfig>> = Lazy::new(|| {
    let mut hmap = HashMap::with_capacity(2);
    hmap.insert(
        "e621".to_string(),
        ServerConfig {
            name: String::from("e621"),
            pretty_name: String::from("e621"),
            base_url: String::from("https://e621.net"),
            user_agent: String::from(DEFAULT_UA),
            max_post_limit: 320,
            request_interval: E621_REQUEST_INTERVAL,
        },
    );
    hmap.insert(
        "e926".to_string(),
        ServerConfig {
            name: String::from("e926"),
            pretty_name: String::from("e926"),
            base_url: String::from("https://e926.net"),
            user_agent: String::from(DEFAULT_UA),
            max_post_limit: 320,
            request_interval: E621_REQUEST_INTERVAL,
        },
    );
    hmap
});

/// All the server-specific knobs for one [`Client`](crate::client::Client)
/// instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub pretty_name: String,
    /// Scheme + host, no trailing slash. All request paths are appended to it.
    pub base_url: String,
    /// Sent on every request. Servers with strict API policies reject
    /// generic or missing user agents, so identify your application here.
    pub user_agent: String,
    /// Maximum number of posts per page the server will return.
    pub max_post_limit: usize,
    /// Minimum wall-clock spacing enforced between any two requests.
    #[serde(default)]
    pub request_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        DEFAULT_SERVERS["e621"].clone()
    }
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
