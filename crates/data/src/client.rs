//! Cached market data client.
//!
//! Wraps a [`MarketDataProvider`] with an [`ExpiringCache`]. Every fetch
//! first checks for a fresh entry; on a miss it performs exactly one provider
//! call and caches the result only on success. Failures are returned to the
//! caller unchanged and leave any earlier entry in place.
//!
//! Concurrent misses for the same key are coalesced: callers queue on a
//! per-key gate and re-check the cache once they hold it, so the second
//! caller is served what the first one fetched.

use crate::cache::{CacheKey, CachedPayload, ExpiringCache};
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::providers::{HttpProvider, MarketDataProvider};
use coinboard_domain::{AssetRecord, CurrencyCode, DominanceSlice, ListingCategory, SentimentIndex};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Counters describing how fetches were served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientStats {
    /// Calls that reached the provider.
    pub network_calls: u64,
    /// Calls served from a fresh cache entry.
    pub cache_hits: u64,
}

/// Market data client with an in-memory expiring cache.
pub struct MarketDataClient {
    provider: Arc<dyn MarketDataProvider>,
    cache: RwLock<ExpiringCache>,
    gates: Mutex<HashMap<CacheKey, Arc<AsyncMutex<()>>>>,
    network_calls: AtomicU64,
    cache_hits: AtomicU64,
}

impl MarketDataClient {
    /// Creates a client over any provider.
    pub fn new(provider: Arc<dyn MarketDataProvider>, freshness_window: Duration) -> Self {
        Self {
            provider,
            cache: RwLock::new(ExpiringCache::new(freshness_window)),
            gates: Mutex::new(HashMap::new()),
            network_calls: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
        }
    }

    /// Creates a client backed by [`HttpProvider`].
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        let provider = HttpProvider::new(config)?;
        Ok(Self::new(Arc::new(provider), config.freshness_window))
    }

    /// Top listings quoted in `currency`.
    ///
    /// # Errors
    /// Returns the provider's error on a cache miss that fails.
    pub async fn fetch_listings(
        &self,
        currency: &CurrencyCode,
    ) -> Result<Arc<Vec<AssetRecord>>, FetchError> {
        self.fetch_category_listings(currency, None).await
    }

    /// Listings in `currency`, ordered upstream by `category` when given.
    ///
    /// # Errors
    /// Returns the provider's error on a cache miss that fails.
    pub async fn fetch_category_listings(
        &self,
        currency: &CurrencyCode,
        category: Option<ListingCategory>,
    ) -> Result<Arc<Vec<AssetRecord>>, FetchError> {
        let key = CacheKey::Listings {
            currency: currency.clone(),
            category,
        };
        let payload = self
            .get_or_fetch(key, || async {
                let assets = self.provider.listings(currency, category).await?;
                info!(currency = %currency, count = assets.len(), "Fetched listings");
                Ok(CachedPayload::Listings(Arc::new(assets)))
            })
            .await?;
        payload.into_listings().ok_or_else(mismatch)
    }

    /// Market capitalisation breakdown.
    ///
    /// # Errors
    /// Returns the provider's error on a cache miss that fails.
    pub async fn fetch_dominance(&self) -> Result<Arc<Vec<DominanceSlice>>, FetchError> {
        let payload = self
            .get_or_fetch(CacheKey::Dominance, || async {
                let slices = self.provider.dominance().await?;
                info!(slices = slices.len(), "Fetched dominance");
                Ok(CachedPayload::Dominance(Arc::new(slices)))
            })
            .await?;
        payload.into_dominance().ok_or_else(mismatch)
    }

    /// Latest sentiment index.
    ///
    /// # Errors
    /// Returns the provider's error on a cache miss that fails.
    pub async fn fetch_sentiment_index(&self) -> Result<Arc<SentimentIndex>, FetchError> {
        let payload = self
            .get_or_fetch(CacheKey::Sentiment, || async {
                let index = self.provider.sentiment().await?;
                info!(value = index.value, class = ?index.classification, "Fetched sentiment");
                Ok(CachedPayload::Sentiment(Arc::new(index)))
            })
            .await?;
        payload.into_sentiment().ok_or_else(mismatch)
    }

    /// Last cached payload for `key`, fresh or stale.
    ///
    /// Callers may fall back to this after a failed fetch.
    pub async fn cached(&self, key: &CacheKey) -> Option<CachedPayload> {
        self.cache
            .read()
            .await
            .get_any(key)
            .map(|entry| entry.payload.clone())
    }

    #[must_use]
    pub fn stats(&self) -> ClientStats {
        ClientStats {
            network_calls: self.network_calls.load(Ordering::SeqCst),
            cache_hits: self.cache_hits.load(Ordering::SeqCst),
        }
    }

    async fn get_or_fetch<F, Fut>(
        &self,
        key: CacheKey,
        fetch: F,
    ) -> Result<CachedPayload, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedPayload, FetchError>>,
    {
        let started = Instant::now();
        if let Some(payload) = self.fresh(&key, started).await {
            return Ok(payload);
        }

        let gate = self.gate(&key);
        let _held = gate.lock().await;

        // a concurrent caller may have filled the entry while we waited
        if let Some(payload) = self.fresh(&key, Instant::now()).await {
            return Ok(payload);
        }

        self.network_calls.fetch_add(1, Ordering::SeqCst);
        let payload = fetch().await.inspect_err(|e| {
            warn!(key = ?key, error = %e, "Fetch failed");
        })?;

        self.cache
            .write()
            .await
            .insert(key, payload.clone(), started);
        Ok(payload)
    }

    async fn fresh(&self, key: &CacheKey, now: Instant) -> Option<CachedPayload> {
        let hit = self.cache.read().await.get_fresh(key, now).cloned();
        if hit.is_some() {
            self.cache_hits.fetch_add(1, Ordering::SeqCst);
            debug!(key = ?key, "Cache hit");
        }
        hit
    }

    fn gate(&self, key: &CacheKey) -> Arc<AsyncMutex<()>> {
        let mut gates = self.gates.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        gates.entry(key.clone()).or_default().clone()
    }
}

fn mismatch() -> FetchError {
    FetchError::Malformed("cache entry holds a different dataset".to_string())
}
