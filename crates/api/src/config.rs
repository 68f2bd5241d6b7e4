//! Server configuration.

use coinboard_domain::DominanceSlice;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::warn;

/// Default upstream market-data API.
pub const DEFAULT_UPSTREAM_URL: &str = "https://pro-api.coinmarketcap.com";

/// Default number of listings requested upstream.
pub const DEFAULT_LISTING_LIMIT: u32 = 50;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// Base URL of the upstream market-data API.
    pub upstream_base_url: String,
    /// Upstream API key. Requests fail with 401 while unset.
    pub api_key: Option<String>,
    /// Listings requested per call.
    pub listing_limit: u32,
    /// Upstream request timeout.
    pub request_timeout: Duration,
    /// Breakdown served by the dominance endpoint.
    pub dominance: Vec<DominanceSlice>,
    /// Whether to allow any origin.
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            upstream_base_url: DEFAULT_UPSTREAM_URL.to_string(),
            api_key: None,
            listing_limit: DEFAULT_LISTING_LIMIT,
            request_timeout: Duration::from_secs(30),
            dominance: DominanceSlice::fallback(),
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// Reads `COINBOARD_BIND_ADDR`, `COINBOARD_UPSTREAM_URL`,
    /// `COINMARKETCAP_API_KEY` and `COINBOARD_LISTING_LIMIT` over the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = env::var("COINBOARD_BIND_ADDR") {
            match addr.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => warn!(value = %addr, "Ignoring invalid COINBOARD_BIND_ADDR"),
            }
        }
        if let Ok(url) = env::var("COINBOARD_UPSTREAM_URL") {
            config.upstream_base_url = url;
        }
        config.api_key = env::var("COINMARKETCAP_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if let Ok(limit) = env::var("COINBOARD_LISTING_LIMIT") {
            match limit.parse() {
                Ok(limit) => config.listing_limit = limit,
                Err(_) => warn!(value = %limit, "Ignoring invalid COINBOARD_LISTING_LIMIT"),
            }
        }
        config
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_upstream_base_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_base_url = url.into();
        self
    }

    /// API key safe for logs: first four characters then `****`.
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_key)
    }
}

fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}****")
}
