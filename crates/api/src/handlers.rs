//! Request handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use coinboard_domain::{CurrencyCode, DominanceSlice, ListingCategory};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Query parameters of `GET /api/crypto`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingsParams {
    pub currency: Option<String>,
    pub category: Option<String>,
}

/// Body of `GET /api/crypto`.
#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub data: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// `GET /api/crypto?currency=<code>[&category=<category>]`
pub async fn crypto_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingsParams>,
) -> Result<Json<ListingsResponse>, ApiError> {
    let currency = match params.currency.as_deref().map(str::trim) {
        None | Some("") => CurrencyCode::usd(),
        Some(code) => CurrencyCode::new(code).map_err(|e| ApiError::BadRequest(e.to_string()))?,
    };
    let category = params
        .category
        .as_deref()
        .map(str::parse::<ListingCategory>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    debug!(currency = %currency, category = ?category, "Listings requested");
    let data = state.upstream.listings(&currency, category).await?;
    Ok(Json(ListingsResponse { data }))
}

/// `GET /api/crypto/dominance`
pub async fn dominance(State(state): State<AppState>) -> Json<Vec<DominanceSlice>> {
    Json(state.config.dominance.clone())
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
