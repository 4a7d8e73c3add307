//! The API facade.
//!
//! [`Client`] composes the request builder, the rate limiter and the response
//! mapper into one fixed pipeline per operation: build the request, wait for
//! an admission slot, dispatch, validate the status, decode the body.
//!
//! Every operation suspends the caller for the full round trip, including any
//! rate-limiter delay. Dropping the returned future cancels the operation and
//! aborts the in-flight request.

use ahash::AHashMap;
use log::{debug, log_enabled, warn, Level};
use reqwest::header::{self, HeaderMap};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Mutex;

use crate::auth::{CredentialStore, Credentials};
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::net::RateLimiter;
use crate::post::comment::Comment;
use crate::post::{Post, VoteResult};
use crate::query::SearchOptions;

use self::models::{CommentsEndpoint, PostEndpoint, PostsEndpoint, UserEndpoint};

mod models;

/// An authenticated client for one e621-compatible server.
///
/// Each instance owns its credential store, rate limiter and conditional
/// request validators, so multiple sessions (or tests) can coexist in one
/// process without sharing state.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    config: ServerConfig,
    credentials: CredentialStore,
    limiter: RateLimiter,
    /// ETag validators recorded per post id, used by
    /// [`refresh_post_if_changed`](Self::refresh_post_if_changed).
    validators: Mutex<AHashMap<u64, String>>,
}

impl Client {
    /// Creates a client with its own HTTP transport.
    ///
    /// # Errors
    /// Fails only if the underlying TLS backend cannot be initialized.
    pub fn new(config: ServerConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Creates a client on top of a caller-provided transport.
    ///
    /// Use this to plug in a proxied or disk-caching `reqwest::Client`; the
    /// per-request headers (user agent, accept, authorization) are still
    /// attached by this client.
    #[must_use]
    pub fn with_http_client(config: ServerConfig, http: reqwest::Client) -> Self {
        let limiter = RateLimiter::new(config.request_interval);
        Self {
            http,
            config,
            credentials: CredentialStore::new(),
            limiter,
            validators: Mutex::new(AHashMap::new()),
        }
    }

    /// The server configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Whether credentials are currently stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// The stored login name, if any.
    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.credentials.username()
    }

    /// Tries to log in with the provided credentials and stores them if the
    /// probe succeeds.
    ///
    /// An expected auth rejection (401/403 or any other unsuccessful status)
    /// returns `false` and leaves previously stored credentials untouched.
    ///
    /// # Errors
    /// Only transport-level faults are raised.
    pub async fn check_credentials(&self, login: &str, api_key: &str) -> Result<bool, ApiError> {
        // The probe must present only the candidate pair, so it skips the
        // stored Authorization header a regular request would carry.
        let candidate = Credentials::new(login, api_key);
        let req = self
            .base_request(Method::GET, &format!("users/{login}.json"))
            .header(header::AUTHORIZATION, candidate.basic_auth());

        let response = self.dispatch(req).await?;
        if response.status().is_success() {
            self.credentials.set(login, api_key);
            return Ok(true);
        }
        debug!("Credential probe rejected with status {}", response.status());
        Ok(false)
    }

    /// Forgets the stored credentials.
    pub fn logout(&self) {
        self.credentials.clear();
    }

    /// Searches posts matching the query. Pages are 1-based; an omitted
    /// limit means the server default.
    pub async fn search_posts(&self, options: &SearchOptions) -> Result<Vec<Post>, ApiError> {
        let cap = u16::try_from(self.config.max_post_limit).unwrap_or(u16::MAX);
        let options = options.clamp_limit(cap);
        debug!(
            "Searching posts: tags='{}' page={} limit={:?}",
            options.tags(),
            options.page(),
            options.limit()
        );
        let req = self
            .request(Method::GET, "posts.json")
            .query(&options.query_pairs());

        let response = Self::check_status(self.dispatch(req).await?).await?;
        let endpoint: PostsEndpoint = Self::decode(response).await?;
        Ok(endpoint.posts)
    }

    /// Fetches one post by id.
    ///
    /// # Errors
    /// A 404 surfaces as an unsuccessful-status failure carrying that code
    /// ([`ApiError::is_not_found`]).
    pub async fn get_post(&self, id: u64) -> Result<Post, ApiError> {
        let req = self.request(Method::GET, &format!("posts/{id}.json"));

        let response = Self::check_status(self.dispatch(req).await?).await?;
        self.record_validator(id, response.headers());
        let endpoint: PostEndpoint = Self::decode(response).await?;
        Ok(endpoint.post)
    }

    /// Re-fetches a post, short-circuiting when the server reports it
    /// unchanged.
    ///
    /// Sends the ETag validator recorded by an earlier fetch of the same
    /// post; a not-modified response returns the input post as-is, with no
    /// body decode.
    pub async fn refresh_post_if_changed(&self, post: &Post) -> Result<Post, ApiError> {
        let mut req = self.request(Method::GET, &format!("posts/{}.json", post.id));
        if let Some(validator) = self.validator(post.id) {
            req = req.header(header::IF_NONE_MATCH, validator);
        }

        let response = Self::check_status(self.dispatch(req).await?).await?;
        if response.status() == StatusCode::NOT_MODIFIED {
            debug!("Post {} not modified, reusing cached copy", post.id);
            return Ok(post.clone());
        }
        self.record_validator(post.id, response.headers());
        let endpoint: PostEndpoint = Self::decode(response).await?;
        Ok(endpoint.post)
    }

    /// Fetches the comments of a post, hidden entries dropped, ordered by
    /// creation time.
    pub async fn comments(&self, post_id: u64) -> Result<Vec<Comment>, ApiError> {
        let req = self.request(Method::GET, &format!("posts/{post_id}/comments.json"));

        let response = Self::check_status(self.dispatch(req).await?).await?;
        let endpoint: CommentsEndpoint = Self::decode(response).await?;

        let mut comments: Vec<Comment> = endpoint
            .comments
            .into_iter()
            .filter(|c| !c.is_hidden)
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    /// Adds a post to the authenticated user's favorites.
    ///
    /// # Errors
    /// [`ApiError::Unauthenticated`] before any network call when no
    /// credentials are stored.
    pub async fn favorite(&self, post_id: u64) -> Result<(), ApiError> {
        if !self.credentials.is_authenticated() {
            warn!("favorite({post_id}) called without credentials available");
            return Err(ApiError::Unauthenticated);
        }
        let req = self
            .request(Method::POST, "favorites.json")
            .query(&[("post_id", post_id)]);

        Self::check_status(self.dispatch(req).await?).await?;
        Ok(())
    }

    /// Removes a post from the authenticated user's favorites.
    ///
    /// # Errors
    /// [`ApiError::Unauthenticated`] before any network call when no
    /// credentials are stored.
    pub async fn unfavorite(&self, post_id: u64) -> Result<(), ApiError> {
        if !self.credentials.is_authenticated() {
            warn!("unfavorite({post_id}) called without credentials available");
            return Err(ApiError::Unauthenticated);
        }
        let req = self.request(Method::DELETE, &format!("favorites/{post_id}.json"));

        Self::check_status(self.dispatch(req).await?).await?;
        Ok(())
    }

    /// Casts a vote on a post. `score` is the signed direction; `no_unvote`
    /// suppresses the toggle-to-neutral behavior when voting the same
    /// direction twice.
    ///
    /// # Errors
    /// [`ApiError::Unauthenticated`] before any network call when no
    /// credentials are stored.
    pub async fn vote(
        &self,
        post_id: u64,
        score: i8,
        no_unvote: bool,
    ) -> Result<VoteResult, ApiError> {
        if !self.credentials.is_authenticated() {
            warn!("vote({post_id}) called without credentials available");
            return Err(ApiError::Unauthenticated);
        }
        let req = self
            .request(Method::POST, &format!("posts/{post_id}/votes.json"))
            .query(&[
                ("score", score.to_string()),
                ("no_unvote", no_unvote.to_string()),
            ]);

        let response = Self::check_status(self.dispatch(req).await?).await?;
        Self::decode(response).await
    }

    /// The authenticated user's blacklist, one tag rule per line of the
    /// profile field.
    ///
    /// Best-effort by design: without stored credentials this logs a warning
    /// and returns an empty list instead of raising.
    pub async fn blacklisted_tags(&self) -> Result<Vec<String>, ApiError> {
        let Some(login) = self.credentials.username() else {
            warn!("blacklisted_tags called without credentials available");
            return Ok(Vec::new());
        };

        let user = self.user_by_name(&login).await?;
        Ok(user
            .blacklisted_tags
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Looks up a user by name and returns their numeric id.
    pub async fn user_id(&self, username: &str) -> Result<u64, ApiError> {
        Ok(self.user_by_name(username).await?.id)
    }

    async fn user_by_name(&self, name: &str) -> Result<UserEndpoint, ApiError> {
        let req = self.request(Method::GET, &format!("users/{name}.json"));
        let response = Self::check_status(self.dispatch(req).await?).await?;
        Self::decode(response).await
    }

    /// Assembles a request for `path` under the configured base URL with the
    /// fixed headers and, when credentials are stored, the derived
    /// `Authorization` header.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.base_request(method, path);
        if let Some(authorization) = self.credentials.authorization() {
            req = req.header(header::AUTHORIZATION, authorization);
        }
        req
    }

    /// Like [`request`](Self::request) but without the stored
    /// `Authorization` header. `RequestBuilder::header` appends rather than
    /// replaces, so callers supplying their own header must start from here.
    fn base_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path}", self.config.base_url);
        self.http
            .request(method, &url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
    }

    /// Waits for a rate-limiter slot, then sends the request.
    async fn dispatch(&self, req: reqwest::RequestBuilder) -> Result<Response, ApiError> {
        self.limiter.acquire().await;
        Ok(req.send().await?)
    }

    /// Validates the HTTP status, passing 2xx and 304 through.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let code = response.status();
        if code.is_success() || code == StatusCode::NOT_MODIFIED {
            return Ok(response);
        }

        let message = code
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string();
        if log_enabled!(Level::Debug) {
            match response.text().await {
                Ok(body) if !body.is_empty() => {
                    debug!("Unsuccessful request ({code}), response body: {body}");
                }
                _ => debug!("Unsuccessful request ({code})"),
            }
        }
        Err(ApiError::UnsuccessfulRequest { code, message })
    }

    /// Decodes the response body into the endpoint's record shape.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn validator(&self, post_id: u64) -> Option<String> {
        self.validators
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&post_id)
            .cloned()
    }

    fn record_validator(&self, post_id: u64, headers: &HeaderMap) {
        if let Some(etag) = headers.get(header::ETAG).and_then(|v| v.to_str().ok()) {
            self.validators
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .insert(post_id, etag.to_string());
        }
    }
}
