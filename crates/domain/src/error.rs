//! Domain error types.

/// Errors raised while constructing or parsing domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Currency code is not a three-letter alphabetic code.
    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),
    /// Unrecognised chart mode name.
    #[error("unknown chart mode: {0}")]
    UnknownChartMode(String),
    /// Unrecognised timeframe name.
    #[error("unknown timeframe: {0}")]
    UnknownTimeframe(String),
    /// Unrecognised listing sort field.
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    /// Unrecognised listing category.
    #[error("unknown listing category: {0}")]
    UnknownCategory(String),
    /// Sentiment value outside `[0, 100]`.
    #[error("sentiment value out of range: {0}")]
    SentimentOutOfRange(i64),
    /// OHLCV series timestamps are not strictly ascending.
    #[error("series is not strictly ascending at index {0}")]
    UnorderedSeries(usize),
}
