//! Dashboard state.
//!
//! The store is an explicit context object: whoever renders listings or the
//! detail view is handed a reference to it. It starts with no data, USD as
//! the selected currency and nothing selected.

use crate::error::FetchError;
use coinboard_domain::{AssetRecord, CurrencyCode};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifies one listings request; only the most recently issued token may
/// update the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The result updated the store.
    Applied,
    /// A newer request was issued meanwhile; the result was dropped.
    Superseded,
    /// The request never produced a result.
    Abandoned,
}

/// Listings, selection and load status shared by the dashboard widgets.
#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    /// `None` until the first successful fetch.
    assets: Option<Arc<Vec<AssetRecord>>>,
    selected_currency: CurrencyCode,
    selected_asset_id: Option<u64>,
    loading: bool,
    error: Option<String>,
    last_issued: u64,
}

impl DashboardStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current listings, or `None` when nothing has been loaded yet.
    #[must_use]
    pub fn assets(&self) -> Option<&Arc<Vec<AssetRecord>>> {
        self.assets.as_ref()
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.assets.is_some()
    }

    #[must_use]
    pub fn selected_currency(&self) -> &CurrencyCode {
        &self.selected_currency
    }

    /// Returns whether the currency changed.
    pub fn set_selected_currency(&mut self, currency: CurrencyCode) -> bool {
        if self.selected_currency == currency {
            return false;
        }
        info!(from = %self.selected_currency, to = %currency, "Currency changed");
        self.selected_currency = currency;
        true
    }

    /// Selects the asset with `id` if it is in the current listings.
    pub fn select_asset(&mut self, id: u64) -> bool {
        let present = self
            .assets
            .as_ref()
            .is_some_and(|assets| assets.iter().any(|a| a.id == id));
        if present {
            self.selected_asset_id = Some(id);
        }
        present
    }

    pub fn clear_selection(&mut self) {
        self.selected_asset_id = None;
    }

    #[must_use]
    pub fn selected_asset(&self) -> Option<&AssetRecord> {
        let id = self.selected_asset_id?;
        self.assets.as_ref()?.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed request, cleared by the next success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a new request as in flight and returns its token.
    ///
    /// Any token issued earlier becomes stale.
    pub fn begin_request(&mut self) -> RequestToken {
        self.last_issued += 1;
        self.loading = true;
        debug!(token = self.last_issued, "Listings request issued");
        RequestToken(self.last_issued)
    }

    /// Gives up on the request identified by `token` without a result.
    ///
    /// Clears the in-flight flag only if `token` is still the latest, so a
    /// newer request keeps its loading state.
    pub fn abandon_request(&mut self, token: RequestToken) -> bool {
        if token.0 != self.last_issued {
            return false;
        }
        debug!(token = token.0, "Listings request abandoned");
        self.loading = false;
        true
    }

    /// Applies the result of the request identified by `token`.
    ///
    /// On failure the listings are left exactly as they were and the error
    /// message is recorded.
    pub fn complete_request(
        &mut self,
        token: RequestToken,
        result: Result<Arc<Vec<AssetRecord>>, FetchError>,
    ) -> Outcome {
        if token.0 != self.last_issued {
            debug!(token = token.0, latest = self.last_issued, "Dropping superseded result");
            return Outcome::Superseded;
        }

        self.loading = false;
        match result {
            Ok(assets) => {
                self.assets = Some(assets);
                self.error = None;
                if self.selected_asset_id.is_some() && self.selected_asset().is_none() {
                    debug!("Selected asset no longer listed, clearing selection");
                    self.selected_asset_id = None;
                }
            }
            Err(e) => {
                warn!(error = %e, "Listings request failed");
                self.error = Some(format!("Unable to load data: {e}"));
            }
        }
        Outcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings(ids: &[u64]) -> Arc<Vec<AssetRecord>> {
        Arc::new(ids.iter().map(|id| AssetRecord::new(*id, "Coin", "C")).collect())
    }

    #[test]
    fn test_initial_state() {
        let store = DashboardStore::new();
        assert!(!store.has_data());
        assert!(!store.is_loading());
        assert_eq!(store.selected_currency(), &CurrencyCode::usd());
        assert!(store.selected_asset().is_none());
        assert!(store.error().is_none());
    }

    #[test]
    fn test_failure_keeps_previous_listings() {
        let mut store = DashboardStore::new();
        let token = store.begin_request();
        store.complete_request(token, Ok(listings(&[1, 2])));

        store.set_selected_currency(CurrencyCode::new("EUR").unwrap());
        let token = store.begin_request();
        let outcome = store.complete_request(
            token,
            Err(FetchError::Network("offline".to_string())),
        );

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(store.assets().unwrap().len(), 2);
        assert!(store.error().unwrap().contains("offline"));
        assert!(!store.is_loading());
    }

    #[test]
    fn test_failure_before_any_data_is_distinct_from_data() {
        let mut store = DashboardStore::new();
        let token = store.begin_request();
        store.complete_request(token, Err(FetchError::Network("offline".to_string())));
        assert!(!store.has_data());
        assert!(store.error().is_some());
    }

    #[test]
    fn test_superseded_result_is_dropped() {
        let mut store = DashboardStore::new();
        let stale = store.begin_request();
        let latest = store.begin_request();

        assert_eq!(store.complete_request(latest, Ok(listings(&[7]))), Outcome::Applied);
        assert_eq!(store.complete_request(stale, Ok(listings(&[1, 2, 3]))), Outcome::Superseded);
        assert_eq!(store.assets().unwrap()[0].id, 7);
    }

    #[test]
    fn test_selection_follows_listings() {
        let mut store = DashboardStore::new();
        assert!(!store.select_asset(1));

        let token = store.begin_request();
        store.complete_request(token, Ok(listings(&[1, 2])));
        assert!(store.select_asset(2));
        assert_eq!(store.selected_asset().unwrap().id, 2);

        let token = store.begin_request();
        store.complete_request(token, Ok(listings(&[1])));
        assert!(store.selected_asset().is_none());
    }

    #[test]
    fn test_abandon_only_clears_latest_request() {
        let mut store = DashboardStore::new();
        let stale = store.begin_request();
        let latest = store.begin_request();

        assert!(!store.abandon_request(stale));
        assert!(store.is_loading());
        assert!(store.abandon_request(latest));
        assert!(!store.is_loading());
        assert!(!store.has_data());
    }

    #[test]
    fn test_success_clears_error() {
        let mut store = DashboardStore::new();
        let token = store.begin_request();
        store.complete_request(token, Err(FetchError::Network("offline".to_string())));
        let token = store.begin_request();
        store.complete_request(token, Ok(listings(&[1])));
        assert!(store.error().is_none());
    }

    #[test]
    fn test_same_currency_is_not_a_change() {
        let mut store = DashboardStore::new();
        assert!(!store.set_selected_currency(CurrencyCode::usd()));
        assert!(store.set_selected_currency(CurrencyCode::new("gbp").unwrap()));
    }
}
