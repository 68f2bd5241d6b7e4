//! Dashboard context: the store plus the client that feeds it.

use crate::client::MarketDataClient;
use crate::store::{DashboardStore, Outcome};
use coinboard_domain::CurrencyCode;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{info, warn};

/// Shared dashboard context handed to every widget that needs listings.
pub struct Dashboard {
    client: Arc<MarketDataClient>,
    store: Arc<RwLock<DashboardStore>>,
}

impl Dashboard {
    pub fn new(client: Arc<MarketDataClient>) -> Self {
        Self {
            client,
            store: Arc::new(RwLock::new(DashboardStore::new())),
        }
    }

    #[must_use]
    pub fn client(&self) -> &Arc<MarketDataClient> {
        &self.client
    }

    /// Read access to the current state.
    pub async fn store(&self) -> RwLockReadGuard<'_, DashboardStore> {
        self.store.read().await
    }

    pub async fn is_loading(&self) -> bool {
        self.store.read().await.is_loading()
    }

    /// Fetches listings in the selected currency and applies the result.
    ///
    /// The store lock is not held across the fetch; if another refresh is
    /// issued meanwhile, this one's result is dropped.
    ///
    /// The fetch runs on its own task and always settles the request, even
    /// when the returned future is dropped before it resolves.
    pub async fn refresh_listings(&self) -> Outcome {
        let (token, currency) = {
            let mut store = self.store.write().await;
            (store.begin_request(), store.selected_currency().clone())
        };

        let client = self.client.clone();
        let store = self.store.clone();
        let request = tokio::spawn(async move {
            let result = client.fetch_listings(&currency).await;
            store.write().await.complete_request(token, result)
        });

        match request.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Listings request task failed");
                self.store.write().await.abandon_request(token);
                Outcome::Abandoned
            }
        }
    }

    /// Switches currency and refreshes when it actually changed.
    pub async fn change_currency(&self, currency: CurrencyCode) -> Option<Outcome> {
        let changed = self.store.write().await.set_selected_currency(currency);
        if !changed {
            return None;
        }
        Some(self.refresh_listings().await)
    }

    /// Selects an asset for the detail view.
    pub async fn select_asset(&self, id: u64) -> bool {
        let selected = self.store.write().await.select_asset(id);
        if selected {
            info!(asset_id = id, "Asset selected");
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::CountingProvider;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn dashboard(provider: &Arc<CountingProvider>) -> Dashboard {
        let client = MarketDataClient::new(provider.clone(), Duration::from_secs(300));
        Dashboard::new(Arc::new(client))
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_populates_store() {
        let provider = Arc::new(CountingProvider::default());
        let dashboard = dashboard(&provider);

        assert_eq!(dashboard.refresh_listings().await, Outcome::Applied);
        let store = dashboard.store().await;
        assert_eq!(store.assets().unwrap().len(), 2);
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_currency_switch_keeps_listings() {
        let provider = Arc::new(CountingProvider::default());
        let dashboard = dashboard(&provider);
        dashboard.refresh_listings().await;
        let before = dashboard.store().await.assets().cloned().unwrap();

        provider.failing.store(true, Ordering::SeqCst);
        let eur = CurrencyCode::new("EUR").unwrap();
        assert_eq!(dashboard.change_currency(eur.clone()).await, Some(Outcome::Applied));

        let store = dashboard.store().await;
        assert!(Arc::ptr_eq(store.assets().unwrap(), &before));
        assert!(store.error().is_some());
        assert_eq!(store.selected_currency(), &eur);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_currency_does_not_refetch() {
        let provider = Arc::new(CountingProvider::default());
        let dashboard = dashboard(&provider);
        assert_eq!(dashboard.change_currency(CurrencyCode::usd()).await, None);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_refresh_still_settles_store() {
        let provider = Arc::new(CountingProvider {
            delay: Some(Duration::from_secs(5)),
            ..Default::default()
        });
        let dashboard = dashboard(&provider);

        let cancelled =
            tokio::time::timeout(Duration::from_secs(1), dashboard.refresh_listings()).await;
        assert!(cancelled.is_err());
        assert!(dashboard.is_loading().await);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let store = dashboard.store().await;
        assert!(!store.is_loading());
        assert!(store.has_data());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_refreshes_last_issued_wins() {
        let provider = Arc::new(CountingProvider {
            delay: Some(Duration::from_millis(100)),
            ..Default::default()
        });
        let dashboard = dashboard(&provider);

        let (first, second) = tokio::join!(dashboard.refresh_listings(), dashboard.refresh_listings());
        let mut outcomes = [first, second];
        outcomes.sort_by_key(|o| *o == Outcome::Applied);
        assert_eq!(outcomes, [Outcome::Superseded, Outcome::Applied]);
        assert!(dashboard.store().await.has_data());
    }
}
