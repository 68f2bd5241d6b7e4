//! Wire formats consumed by the HTTP provider.

use crate::error::FetchError;
use chrono::DateTime;
use coinboard_domain::{AssetRecord, SentimentIndex};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/crypto`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsEnvelope {
    pub data: Vec<AssetRecord>,
}

/// Error body returned by the dashboard API.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Body of the public sentiment endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentEnvelope {
    pub data: Vec<SentimentRecord>,
}

/// One sentiment reading; numbers arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentRecord {
    pub value: String,
    #[serde(default)]
    pub value_classification: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub time_until_update: Option<String>,
}

impl TryFrom<SentimentEnvelope> for SentimentIndex {
    type Error = FetchError;

    fn try_from(envelope: SentimentEnvelope) -> Result<Self, Self::Error> {
        let record = envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed("sentiment response has no data".to_string()))?;

        let value: i64 = record
            .value
            .trim()
            .parse()
            .map_err(|_| {
                FetchError::Malformed(format!("invalid sentiment value: {}", record.value))
            })?;
        let secs: i64 = record.timestamp.trim().parse().map_err(|_| {
            FetchError::Malformed(format!("invalid sentiment timestamp: {}", record.timestamp))
        })?;
        let as_of = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| FetchError::Malformed(format!("timestamp out of range: {secs}")))?;

        let mut index =
            SentimentIndex::new(value, as_of).map_err(|e| FetchError::Malformed(e.to_string()))?;
        if let Some(label) = record.value_classification {
            index = index.with_upstream_label(label);
        }
        if let Some(secs) = record
            .time_until_update
            .as_deref()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            index = index.with_time_until_update(secs);
        }
        Ok(index)
    }
}
