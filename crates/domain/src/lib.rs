//! Core domain types for the coinboard market dashboard.
//!
//! This crate holds the data model shared by every other crate:
//! - Asset records and per-currency quotes as delivered by the market-data provider
//! - Dominance breakdown and the sentiment index with its classification policy
//! - OHLCV points consumed by the chart renderer
//! - Chart mode, timeframe and listing-table ordering rules

/// Domain entities.
pub mod entities;
/// Enumerations shared across crates.
pub mod enums;
/// Error types.
pub mod error;
/// Placeholder-aware display formatting.
pub mod format;
/// Listing table filtering and ordering.
pub mod listing;
/// Value objects.
pub mod value_objects;

pub use entities::{
    AssetRecord, CandleDirection, DominanceSlice, OhlcvPoint, Quote, SentimentClass,
    SentimentIndex,
};
pub use enums::{ChartMode, ListingCategory, SortField, Timeframe};
pub use error::DomainError;
pub use value_objects::currency::CurrencyCode;
