use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Share of total market capitalisation attributed to one asset (or "Others").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominanceSlice {
    pub name: String,
    #[serde(rename = "value", with = "rust_decimal::serde::float")]
    pub percentage_share: Decimal,
}

impl DominanceSlice {
    pub fn new(name: impl Into<String>, percentage_share: Decimal) -> Self {
        Self {
            name: name.into(),
            percentage_share,
        }
    }

    /// Hard-coded breakdown served when no live source is configured.
    #[must_use]
    pub fn fallback() -> Vec<Self> {
        vec![
            Self::new("Bitcoin", Decimal::new(5973, 2)),
            Self::new("Ethereum", Decimal::new(982, 2)),
            Self::new("Others", Decimal::new(3045, 2)),
        ]
    }

    /// Sum of all shares. Advisory only: nothing guarantees it equals 100.
    #[must_use]
    pub fn total_share(slices: &[Self]) -> Decimal {
        slices.iter().map(|s| s.percentage_share).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fallback_sums_to_hundred() {
        assert_eq!(DominanceSlice::total_share(&DominanceSlice::fallback()), dec!(100.00));
    }

    #[test]
    fn test_wire_name_is_value() {
        let slice: DominanceSlice =
            serde_json::from_str(r#"{"name":"Bitcoin","value":59.73}"#).unwrap();
        assert_eq!(slice.percentage_share, dec!(59.73));
    }
}
