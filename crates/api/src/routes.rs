//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    let enable_cors = state.config.enable_cors;
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/crypto", get(handlers::crypto_listings))
        .route("/api/crypto/dominance", get(handlers::dominance))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
