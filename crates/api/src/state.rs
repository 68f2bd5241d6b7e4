//! Shared application state.

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::upstream::UpstreamClient;
use std::sync::Arc;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    /// # Errors
    /// Returns an error if the upstream HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self, ApiError> {
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
        })
    }
}
