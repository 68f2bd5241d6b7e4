use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Qualitative label of the sentiment index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentClass {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentClass {
    /// The single classification policy used everywhere in the dashboard.
    ///
    /// | value    | class        |
    /// |----------|--------------|
    /// | 0..=24   | ExtremeFear  |
    /// | 25..=44  | Fear         |
    /// | 45..=59  | Neutral      |
    /// | 60..=79  | Greed        |
    /// | 80..=100 | ExtremeGreed |
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        match value {
            0..25 => Self::ExtremeFear,
            25..45 => Self::Fear,
            45..60 => Self::Neutral,
            60..80 => Self::Greed,
            _ => Self::ExtremeGreed,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExtremeFear => "Extreme Fear",
            Self::Fear => "Fear",
            Self::Neutral => "Neutral",
            Self::Greed => "Greed",
            Self::ExtremeGreed => "Extreme Greed",
        }
    }
}

/// Aggregate market mood on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentIndex {
    pub value: u8,
    pub classification: SentimentClass,
    /// Label as reported by the third party, kept for display only.
    pub upstream_label: Option<String>,
    pub as_of: DateTime<Utc>,
    /// Seconds until the provider publishes the next value.
    pub time_until_update: Option<u64>,
}

impl SentimentIndex {
    /// Builds an index, deriving the classification from `value`.
    ///
    /// # Errors
    /// Returns [`DomainError::SentimentOutOfRange`] if `value` is outside `[0, 100]`.
    pub fn new(value: i64, as_of: DateTime<Utc>) -> Result<Self, DomainError> {
        let value = u8::try_from(value)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or(DomainError::SentimentOutOfRange(value))?;
        Ok(Self {
            value,
            classification: SentimentClass::from_value(value),
            upstream_label: None,
            as_of,
            time_until_update: None,
        })
    }

    #[must_use]
    pub fn with_upstream_label(mut self, label: impl Into<String>) -> Self {
        self.upstream_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_time_until_update(mut self, secs: u64) -> Self {
        self.time_until_update = Some(secs);
        self
    }
}
