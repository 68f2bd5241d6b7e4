use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies offered by the dashboard's currency selector.
pub const SUPPORTED_CURRENCIES: [&str; 5] = ["USD", "EUR", "CHF", "GBP", "INR"];

/// Upper-cased three-letter currency code.
///
/// Used both as the upstream `convert` parameter and as the listings cache
/// key, so `eur` and `EUR` always resolve to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalises a currency code.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidCurrency`] unless the trimmed input is
    /// exactly three ASCII letters.
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code is one of [`SUPPORTED_CURRENCIES`].
    #[must_use]
    pub fn is_supported(&self) -> bool {
        SUPPORTED_CURRENCIES.contains(&self.0.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}
