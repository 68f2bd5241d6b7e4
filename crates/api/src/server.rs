//! Server startup.

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::routes::create_router;
use crate::state::AppState;
use std::io;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// The passthrough API server.
pub struct ApiServer {
    config: ServerConfig,
}

impl ApiServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Binds and serves until Ctrl-C.
    ///
    /// # Errors
    /// Returns an error if the listener cannot be bound or the server fails.
    pub async fn run(self) -> io::Result<()> {
        match self.config.masked_api_key() {
            Some(masked) => info!(api_key = %masked, "Upstream API key configured"),
            None => warn!("COINMARKETCAP_API_KEY is not set; listings will answer 401"),
        }

        let addr = self.config.bind_addr;
        let state = AppState::new(self.config)
            .map_err(|e: ApiError| io::Error::other(e.to_string()))?;
        let app = create_router(state);

        let listener = TcpListener::bind(addr).await?;
        info!(addr = %addr, "API server listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
