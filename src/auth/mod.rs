//! Login/API-key handling and the derived `Authorization` header.
//!
//! The store is the only piece of shared mutable state besides the rate
//! limiter watermark. It hands out the fully derived header value so request
//! assembly never sees the raw API key.

use std::sync::RwLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;

/// A login/API-key pair as entered by the user.
///
/// The API key is a site-generated token, not the account password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    /// Derives the `Authorization` header value:
    /// `Basic <base64(username:api_key)>`.
    #[must_use]
    pub fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.username, self.api_key);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

/// Holds the current credentials (or none) for one client instance.
///
/// Concurrent request paths read this store while a login/logout may be in
/// flight, so access goes through an `RwLock`: readers observe either the old
/// or the new pair atomically, never a torn state.
#[derive(Debug, Default)]
pub struct CredentialStore {
    inner: RwLock<Option<Credentials>>,
}

impl CredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a credential pair. Subsequent requests carry the derived
    /// header until [`clear`](Self::clear) is called.
    pub fn set(&self, username: impl Into<String>, api_key: impl Into<String>) {
        let creds = Credentials::new(username, api_key);
        debug!("Storing credentials for user {}", creds.username);
        *self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(creds);
    }

    pub fn clear(&self) {
        debug!("Clearing stored credentials");
        *self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner) = None;
    }

    /// The `Authorization` header value derived from the stored pair, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .map(Credentials::basic_auth)
    }

    /// The stored login name, if any.
    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .map(|c| c.username.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_derivation() {
        let creds = Credentials::new("fox", "hunter2");
        // base64("fox:hunter2")
        assert_eq!(creds.basic_auth(), "Basic Zm94Omh1bnRlcjI=");
    }

    #[test]
    fn store_set_and_clear() {
        let store = CredentialStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.authorization(), None);

        store.set("fox", "hunter2");
        assert!(store.is_authenticated());
        assert_eq!(store.username().as_deref(), Some("fox"));
        assert_eq!(
            store.authorization().as_deref(),
            Some("Basic Zm94Omh1bnRlcjI=")
        );

        store.clear();
        assert!(!store.is_authenticated());
        assert_eq!(store.authorization(), None);
    }
}
