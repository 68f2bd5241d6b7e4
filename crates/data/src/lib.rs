//! Market data access for the dashboard.
//!
//! This crate provides the client-side data layer:
//! - A [`MarketDataProvider`] abstraction with an HTTP implementation
//! - An in-memory cache with a fixed freshness window
//! - A cached client that coalesces concurrent requests for the same key
//! - The dashboard store, an explicit context object holding listings and selection
//! - A cancellable polling task that keeps listings fresh

/// Cache entries and freshness rules.
pub mod cache;
/// Cached market data client.
pub mod client;
/// Client configuration.
pub mod config;
/// Dashboard context and refresh operations.
pub mod dashboard;
/// Error types.
pub mod error;
/// Periodic listings refresh.
pub mod polling;
/// Market data provider implementations.
pub mod providers;
/// Dashboard state.
pub mod store;
/// Wire formats of the endpoints consumed by the providers.
pub mod wire;

pub use cache::{CacheEntry, CacheKey, CachedPayload, ExpiringCache};
pub use client::{ClientStats, MarketDataClient};
pub use config::ClientConfig;
pub use dashboard::Dashboard;
pub use error::FetchError;
pub use polling::{PollingHandle, spawn_polling};
pub use providers::MarketDataProvider;
pub use store::{DashboardStore, Outcome, RequestToken};
