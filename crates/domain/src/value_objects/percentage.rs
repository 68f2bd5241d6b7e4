use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a percent change, used to pick the up/down styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeDirection {
    Up,
    Down,
    Unknown,
}

impl ChangeDirection {
    /// Zero counts as up; an absent change has no direction.
    #[must_use]
    pub fn of(change: Option<Decimal>) -> Self {
        match change {
            Some(c) if c >= Decimal::ZERO => Self::Up,
            Some(_) => Self::Down,
            None => Self::Unknown,
        }
    }

    #[must_use]
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_direction_boundaries() {
        assert_eq!(ChangeDirection::of(Some(dec!(0))), ChangeDirection::Up);
        assert_eq!(ChangeDirection::of(Some(dec!(-0.01))), ChangeDirection::Down);
        assert_eq!(ChangeDirection::of(None), ChangeDirection::Unknown);
    }
}
