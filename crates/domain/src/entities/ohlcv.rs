use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a candle closed at or above its open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleDirection {
    Bullish,
    Bearish,
}

/// One time-bucketed trading interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvPoint {
    /// Bucket start, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvPoint {
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp_ms,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }

    /// `close == open` counts as bullish.
    #[must_use]
    pub fn direction(&self) -> CandleDirection {
        if self.close >= self.open {
            CandleDirection::Bullish
        } else {
            CandleDirection::Bearish
        }
    }
}

/// Checks that timestamps are strictly ascending.
///
/// # Errors
/// Returns [`DomainError::UnorderedSeries`] with the index of the first point
/// that does not come after its predecessor.
pub fn validate_series(points: &[OhlcvPoint]) -> Result<(), DomainError> {
    match points
        .windows(2)
        .position(|w| w[1].timestamp_ms <= w[0].timestamp_ms)
    {
        Some(i) => Err(DomainError::UnorderedSeries(i + 1)),
        None => Ok(()),
    }
}
