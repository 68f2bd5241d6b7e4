//! In-memory cache with a fixed freshness window.
//!
//! An entry is fresh iff `now - fetched_at < freshness_window`. Stale entries
//! are never evicted proactively; they stay readable (see
//! [`ExpiringCache::get_any`]) until the next successful fetch replaces them.

use coinboard_domain::{AssetRecord, CurrencyCode, DominanceSlice, ListingCategory, SentimentIndex};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Identifies one cached dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Listings in one currency, optionally in a category order.
    Listings {
        currency: CurrencyCode,
        category: Option<ListingCategory>,
    },
    Dominance,
    Sentiment,
}

impl CacheKey {
    #[must_use]
    pub fn listings(currency: &CurrencyCode) -> Self {
        Self::Listings {
            currency: currency.clone(),
            category: None,
        }
    }
}

/// Cached payload. Payloads are shared, never mutated in place.
#[derive(Debug, Clone)]
pub enum CachedPayload {
    Listings(Arc<Vec<AssetRecord>>),
    Dominance(Arc<Vec<DominanceSlice>>),
    Sentiment(Arc<SentimentIndex>),
}

impl CachedPayload {
    #[must_use]
    pub fn into_listings(self) -> Option<Arc<Vec<AssetRecord>>> {
        match self {
            Self::Listings(l) => Some(l),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_dominance(self) -> Option<Arc<Vec<DominanceSlice>>> {
        match self {
            Self::Dominance(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_sentiment(self) -> Option<Arc<SentimentIndex>> {
        match self {
            Self::Sentiment(s) => Some(s),
            _ => None,
        }
    }
}

/// Last fetched payload and when it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fetched_at: Instant,
    pub payload: CachedPayload,
}

impl CacheEntry {
    #[must_use]
    pub fn is_fresh(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < window
    }
}

/// Key to entry mapping with a single freshness window.
#[derive(Debug)]
pub struct ExpiringCache {
    entries: HashMap<CacheKey, CacheEntry>,
    freshness_window: Duration,
}

impl ExpiringCache {
    #[must_use]
    pub fn new(freshness_window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            freshness_window,
        }
    }

    #[must_use]
    pub fn freshness_window(&self) -> Duration {
        self.freshness_window
    }

    /// Payload under `key` if it is still fresh at `now`.
    #[must_use]
    pub fn get_fresh(&self, key: &CacheKey, now: Instant) -> Option<&CachedPayload> {
        self.entries
            .get(key)
            .filter(|e| e.is_fresh(now, self.freshness_window))
            .map(|e| &e.payload)
    }

    /// Entry under `key` regardless of age.
    #[must_use]
    pub fn get_any(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Stores `payload`, replacing any previous entry.
    pub fn insert(&mut self, key: CacheKey, payload: CachedPayload, fetched_at: Instant) {
        self.entries.insert(key, CacheEntry { fetched_at, payload });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dominance() -> CachedPayload {
        CachedPayload::Dominance(Arc::new(DominanceSlice::fallback()))
    }

    #[test]
    fn test_fresh_within_window_only() {
        let window = Duration::from_secs(300);
        let mut cache = ExpiringCache::new(window);
        let t0 = Instant::now();
        cache.insert(CacheKey::Dominance, dominance(), t0);

        assert!(cache.get_fresh(&CacheKey::Dominance, t0).is_some());
        assert!(
            cache
                .get_fresh(&CacheKey::Dominance, t0 + Duration::from_secs(299))
                .is_some()
        );
        // exactly at the window boundary the entry is stale
        assert!(cache.get_fresh(&CacheKey::Dominance, t0 + window).is_none());
        // but still readable
        assert!(cache.get_any(&CacheKey::Dominance).is_some());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = ExpiringCache::new(Duration::from_secs(300));
        let now = Instant::now();
        let usd = CacheKey::listings(&CurrencyCode::usd());
        cache.insert(usd.clone(), CachedPayload::Listings(Arc::new(Vec::new())), now);

        let eur = CacheKey::listings(&CurrencyCode::new("EUR").unwrap());
        assert!(cache.get_fresh(&usd, now).is_some());
        assert!(cache.get_fresh(&eur, now).is_none());
        assert!(cache.get_fresh(&CacheKey::Sentiment, now).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_payload_accessors() {
        assert!(dominance().into_dominance().is_some());
        assert!(dominance().into_listings().is_none());
        assert!(dominance().into_sentiment().is_none());
    }
}
