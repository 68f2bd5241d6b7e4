//! HTTP passthrough server for the coinboard dashboard.
//!
//! Endpoints:
//! - `GET /api/crypto?currency=<code>[&category=<category>]` forwards one
//!   listings call upstream and returns `{ "data": [...] }`
//! - `GET /api/crypto/dominance` serves the configured dominance breakdown
//! - `GET /health` liveness probe

/// Server configuration.
pub mod config;
/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// Route definitions.
pub mod routes;
/// Server startup.
pub mod server;
/// Application state.
pub mod state;
/// Upstream market-data client.
pub mod upstream;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use server::ApiServer;
pub use state::AppState;
