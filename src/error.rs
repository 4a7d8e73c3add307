use reqwest::StatusCode;
use thiserror::Error;

/// Enumerates the possible failures of an API operation.
///
/// The taxonomy deliberately keeps transport faults, unsuccessful HTTP
/// statuses and body-decoding problems apart, so callers can distinguish
/// "server unreachable" from "server rejected" from "server sent something
/// we can't parse".
#[derive(Error, Debug)]
pub enum ApiError {
    /// An error occurred during the network round trip (connection refused,
    /// timeout, TLS failure). Wraps the underlying `reqwest::Error` and is
    /// never retried internally.
    #[error("Connection error")]
    Connection(#[from] reqwest::Error),

    /// The server answered with a non-2xx, non-304 status.
    #[error("Unsuccessful request: {message} (status {code})")]
    UnsuccessfulRequest {
        code: StatusCode,
        message: String,
    },

    /// The response body did not match the expected shape for the operation.
    /// Wraps the underlying `serde_json::Error`.
    #[error("Error while deserializing JSON response")]
    Deserialize(#[from] serde_json::Error),

    /// The operation requires stored credentials and none are set.
    ///
    /// Raised locally, before any network call is made.
    #[error("No credentials available")]
    Unauthenticated,
}

impl ApiError {
    /// Whether this failure is the server reporting that the requested
    /// resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnsuccessfulRequest { code, .. } if *code == StatusCode::NOT_FOUND)
    }

    /// The HTTP status code carried by this failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnsuccessfulRequest { code, .. } => Some(*code),
            Self::Connection(e) => e.status(),
            _ => None,
        }
    }
}
