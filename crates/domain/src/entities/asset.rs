use crate::value_objects::currency::CurrencyCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metrics of one asset expressed in one currency.
///
/// Every field is optional: a field the provider omitted stays `None` and is
/// rendered as a placeholder, never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub percent_change_1h: Option<Decimal>,
    #[serde(default)]
    pub percent_change_24h: Option<Decimal>,
    #[serde(default)]
    pub percent_change_7d: Option<Decimal>,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub volume_24h: Option<Decimal>,
    #[serde(default)]
    pub fully_diluted_market_cap: Option<Decimal>,
}

/// One listing entry: identity, supply metrics and quotes keyed by currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub cmc_rank: Option<u32>,
    #[serde(default)]
    pub circulating_supply: Option<Decimal>,
    #[serde(default)]
    pub total_supply: Option<Decimal>,
    #[serde(default)]
    pub max_supply: Option<Decimal>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default)]
    pub quote: HashMap<CurrencyCode, Quote>,
}

impl AssetRecord {
    pub fn new(id: u64, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            slug: None,
            cmc_rank: None,
            circulating_supply: None,
            total_supply: None,
            max_supply: None,
            date_added: None,
            quote: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_quote(mut self, currency: CurrencyCode, quote: Quote) -> Self {
        self.quote.insert(currency, quote);
        self
    }

    /// Quote in `currency`, if the provider delivered one.
    #[must_use]
    pub fn quote_in(&self, currency: &CurrencyCode) -> Option<&Quote> {
        self.quote.get(currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_fields_stay_absent() {
        let json = r#"{
            "id": 1,
            "name": "Bitcoin",
            "symbol": "BTC",
            "cmc_rank": 1,
            "circulating_supply": 19800000,
            "max_supply": null,
            "date_added": "2010-07-13T00:00:00.000Z",
            "quote": { "EUR": { "price": 61234.5, "percent_change_24h": -1.25 } }
        }"#;
        let record: AssetRecord = serde_json::from_str(json).unwrap();
        let eur = CurrencyCode::new("EUR").unwrap();
        let quote = record.quote_in(&eur).unwrap();

        assert_eq!(quote.price, Some(dec!(61234.5)));
        assert_eq!(quote.percent_change_24h, Some(dec!(-1.25)));
        assert_eq!(quote.market_cap, None);
        assert_eq!(record.max_supply, None);
        assert_eq!(record.total_supply, None);
        assert!(record.date_added.is_some());
        assert!(record.quote_in(&CurrencyCode::usd()).is_none());
    }
}
