//! Client configuration.

use std::env;
use std::time::Duration;
use tracing::warn;

/// Default freshness window of cached payloads.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Public sentiment index endpoint.
pub const DEFAULT_SENTIMENT_URL: &str = "https://api.alternative.me/fng/?limit=1";

/// Configuration for [`crate::providers::HttpProvider`] and [`crate::MarketDataClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the dashboard API serving `/api/crypto`.
    pub api_base_url: String,
    /// Full URL of the sentiment index endpoint.
    pub sentiment_url: String,
    /// How long a cached payload is served without a network call.
    pub freshness_window: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3000".to_string(),
            sentiment_url: DEFAULT_SENTIMENT_URL.to_string(),
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from the environment, falling back to defaults.
    ///
    /// Reads `COINBOARD_API_URL`, `COINBOARD_SENTIMENT_URL` and
    /// `COINBOARD_CACHE_TTL_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("COINBOARD_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(url) = env::var("COINBOARD_SENTIMENT_URL") {
            config.sentiment_url = url;
        }
        if let Ok(ttl) = env::var("COINBOARD_CACHE_TTL_SECS") {
            match ttl.parse::<u64>() {
                Ok(secs) => config.freshness_window = Duration::from_secs(secs),
                Err(_) => warn!(value = %ttl, "Ignoring invalid COINBOARD_CACHE_TTL_SECS"),
            }
        }
        config
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_sentiment_url(mut self, url: impl Into<String>) -> Self {
        self.sentiment_url = url.into();
        self
    }

    #[must_use]
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }
}
