//! Listing table filtering and ordering.
//!
//! All orderings are descending and stable. Records missing the compared
//! value sort after every record that has it, so an absent field never
//! masquerades as zero.

use crate::entities::asset::AssetRecord;
use crate::enums::{ListingCategory, SortField};
use crate::value_objects::currency::CurrencyCode;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Rows shown by a category view.
pub const CATEGORY_VIEW_LEN: usize = 10;

/// Search, ordering and currency for the full listing table.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Case-insensitive substring matched against name and symbol.
    pub search: String,
    pub sort: SortField,
    pub currency: CurrencyCode,
}

impl ListingQuery {
    /// Filters then sorts `assets`, borrowing the records.
    #[must_use]
    pub fn apply<'a>(&self, assets: &'a [AssetRecord]) -> Vec<&'a AssetRecord> {
        let mut rows = filter_by_search(assets, &self.search);
        sort_by_field(&mut rows, self.sort, &self.currency);
        rows
    }
}

#[must_use]
pub fn filter_by_search<'a>(assets: &'a [AssetRecord], query: &str) -> Vec<&'a AssetRecord> {
    let query = query.trim().to_lowercase();
    assets
        .iter()
        .filter(|a| {
            query.is_empty()
                || a.name.to_lowercase().contains(&query)
                || a.symbol.to_lowercase().contains(&query)
        })
        .collect()
}

/// Value of `field` for `asset` in `currency`.
#[must_use]
pub fn field_value(
    asset: &AssetRecord,
    field: SortField,
    currency: &CurrencyCode,
) -> Option<Decimal> {
    if field == SortField::CirculatingSupply {
        return asset.circulating_supply;
    }
    let quote = asset.quote_in(currency)?;
    match field {
        SortField::Price => quote.price,
        SortField::PercentChange1h => quote.percent_change_1h,
        SortField::PercentChange24h => quote.percent_change_24h,
        SortField::PercentChange7d => quote.percent_change_7d,
        SortField::MarketCap => quote.market_cap,
        SortField::Volume24h => quote.volume_24h,
        SortField::CirculatingSupply => asset.circulating_supply,
    }
}

pub fn sort_by_field(rows: &mut [&AssetRecord], field: SortField, currency: &CurrencyCode) {
    rows.sort_by(|a, b| {
        descending_present_first(
            field_value(a, field, currency),
            field_value(b, field, currency),
        )
    });
}

/// Top [`CATEGORY_VIEW_LEN`] records for a curated category.
#[must_use]
pub fn category_view<'a>(
    assets: &'a [AssetRecord],
    category: ListingCategory,
    currency: &CurrencyCode,
) -> Vec<&'a AssetRecord> {
    let mut rows: Vec<&AssetRecord> = assets.iter().collect();
    match category {
        ListingCategory::Trending => {
            sort_by_field(&mut rows, SortField::PercentChange24h, currency)
        }
        ListingCategory::MostViewed => sort_by_field(&mut rows, SortField::MarketCap, currency),
        ListingCategory::New => {
            rows.sort_by(|a, b| descending_present_first(a.date_added, b.date_added));
        }
    }
    rows.truncate(CATEGORY_VIEW_LEN);
    rows
}

/// Largest 24h gainers, at most `limit` records.
#[must_use]
pub fn top_movers<'a>(
    assets: &'a [AssetRecord],
    currency: &CurrencyCode,
    limit: usize,
) -> Vec<&'a AssetRecord> {
    let mut rows: Vec<&AssetRecord> = assets.iter().collect();
    sort_by_field(&mut rows, SortField::PercentChange24h, currency);
    rows.truncate(limit);
    rows
}

fn descending_present_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::asset::Quote;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn asset(id: u64, name: &str, symbol: &str, cap: Option<Decimal>, change: Option<Decimal>) -> AssetRecord {
        AssetRecord::new(id, name, symbol).with_quote(
            CurrencyCode::usd(),
            Quote {
                market_cap: cap,
                percent_change_24h: change,
                ..Default::default()
            },
        )
    }

    fn sample() -> Vec<AssetRecord> {
        vec![
            asset(1, "Bitcoin", "BTC", Some(dec!(1200)), Some(dec!(1.5))),
            asset(2, "Ethereum", "ETH", Some(dec!(400)), Some(dec!(-2.0))),
            asset(3, "Mystery", "MYS", None, Some(dec!(9.0))),
            asset(4, "Bitcoin Cash", "BCH", Some(dec!(10)), None),
        ]
    }

    fn ids(rows: &[&AssetRecord]) -> Vec<u64> {
        rows.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_search_matches_name_or_symbol() {
        let assets = sample();
        assert_eq!(ids(&filter_by_search(&assets, "bitcoin")), vec![1, 4]);
        assert_eq!(ids(&filter_by_search(&assets, "eth")), vec![2]);
        assert_eq!(filter_by_search(&assets, "").len(), 4);
    }

    #[test]
    fn test_sort_descending_with_missing_last() {
        let assets = sample();
        let query = ListingQuery::default();
        assert_eq!(ids(&query.apply(&assets)), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_sort_by_other_currency_without_quotes() {
        let assets = sample();
        let query = ListingQuery {
            currency: CurrencyCode::new("EUR").unwrap(),
            ..Default::default()
        };
        // no EUR quotes at all: original order is kept
        assert_eq!(ids(&query.apply(&assets)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_category_views() {
        let mut assets = sample();
        assets[1].date_added = Some(Utc.with_ymd_and_hms(2015, 7, 30, 0, 0, 0).unwrap());
        assets[2].date_added = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let usd = CurrencyCode::usd();

        assert_eq!(ids(&category_view(&assets, ListingCategory::Trending, &usd)), vec![3, 1, 2, 4]);
        assert_eq!(ids(&category_view(&assets, ListingCategory::New, &usd)), vec![3, 2, 1, 4]);
        assert_eq!(ids(&category_view(&assets, ListingCategory::MostViewed, &usd)), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_category_view_truncates() {
        let assets: Vec<AssetRecord> = (0..25)
            .map(|i| asset(i, "Coin", "C", Some(Decimal::from(i)), None))
            .collect();
        let rows = category_view(&assets, ListingCategory::MostViewed, &CurrencyCode::usd());
        assert_eq!(rows.len(), CATEGORY_VIEW_LEN);
        assert_eq!(rows[0].id, 24);
    }

    #[test]
    fn test_top_movers() {
        let assets = sample();
        assert_eq!(ids(&top_movers(&assets, &CurrencyCode::usd(), 2)), vec![3, 1]);
    }
}
