//! Fetch error types.

use thiserror::Error;

/// Failure of a single market data fetch.
///
/// Upstream and network failures both reject the pending fetch; callers that
/// only need "it failed" can treat them alike and use [`FetchError::status`]
/// when the status matters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-2xx status.
    #[error("fetch failed with status {status}: {message}")]
    FetchFailed { status: u16, message: String },

    /// The request never produced a response (offline, DNS, timeout...).
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// HTTP status of the failed response, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status, .. } => Some(*status),
            Self::Network(_) | Self::Malformed(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Malformed(err.to_string());
        }
        match err.status() {
            Some(status) => Self::FetchFailed {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
