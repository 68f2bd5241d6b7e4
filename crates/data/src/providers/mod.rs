//! Market data providers.

mod http;

pub use http::HttpProvider;

use crate::error::FetchError;
use async_trait::async_trait;
use coinboard_domain::{AssetRecord, CurrencyCode, DominanceSlice, ListingCategory, SentimentIndex};

/// Source of the three read-only datasets the dashboard displays.
///
/// Implementations perform exactly one upstream call per method invocation
/// and never retry; caching lives in [`crate::MarketDataClient`].
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Top listings quoted in `currency`, optionally ordered by `category`.
    async fn listings(
        &self,
        currency: &CurrencyCode,
        category: Option<ListingCategory>,
    ) -> Result<Vec<AssetRecord>, FetchError>;

    /// Market capitalisation breakdown.
    async fn dominance(&self) -> Result<Vec<DominanceSlice>, FetchError>;

    /// Latest sentiment index reading.
    async fn sentiment(&self) -> Result<SentimentIndex, FetchError>;
}
