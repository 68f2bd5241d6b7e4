use crate::error::DomainError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartMode {
    #[default]
    Price,
    MarketCap,
    Candlestick,
}

impl ChartMode {
    pub const ALL: [ChartMode; 3] = [Self::Price, Self::MarketCap, Self::Candlestick];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::MarketCap => "Market Cap",
            Self::Candlestick => "Candlestick",
        }
    }
}

impl FromStr for ChartMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "marketcap" | "market_cap" | "market-cap" => Ok(Self::MarketCap),
            "candlestick" | "candles" => Ok(Self::Candlestick),
            _ => Err(DomainError::UnknownChartMode(s.to_string())),
        }
    }
}

/// Time window shown by the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "7D")]
    SevenDays,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "All")]
    All,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Self::OneDay,
        Self::SevenDays,
        Self::OneMonth,
        Self::OneYear,
        Self::All,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::SevenDays => "7D",
            Self::OneMonth => "1M",
            Self::OneYear => "1Y",
            Self::All => "All",
        }
    }

    /// Allowed zoom scale factors `(min, max)`.
    ///
    /// The upper bound keeps zooming within the resolution implied by the
    /// point density of the timeframe.
    #[must_use]
    pub fn zoom_bounds(&self) -> (f64, f64) {
        match self {
            Self::OneDay => (1.0, 240.0),
            Self::SevenDays => (1.0, 168.0),
            Self::OneMonth => (1.0, 30.0),
            Self::OneYear => (1.0, 4.0),
            Self::All => (1.0, 6.0),
        }
    }

    /// Spacing between consecutive points of a series in this timeframe.
    #[must_use]
    pub fn point_spacing(&self) -> TimeDelta {
        match self {
            Self::OneDay => TimeDelta::hours(1),
            Self::SevenDays => TimeDelta::hours(6),
            Self::OneMonth => TimeDelta::hours(12),
            Self::OneYear => TimeDelta::days(3),
            Self::All => TimeDelta::days(10),
        }
    }

    /// `strftime` pattern for time-axis labels.
    #[must_use]
    pub fn tick_format(&self) -> &'static str {
        match self {
            Self::OneDay => "%H:%M",
            Self::SevenDays | Self::OneMonth => "%b %d",
            Self::OneYear => "%b %Y",
            Self::All => "%Y",
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        match self {
            Self::OneDay => 6,
            Self::SevenDays | Self::OneMonth => 5,
            Self::OneYear | Self::All => 4,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1D" => Ok(Self::OneDay),
            "7D" => Ok(Self::SevenDays),
            "1M" => Ok(Self::OneMonth),
            "1Y" => Ok(Self::OneYear),
            "ALL" => Ok(Self::All),
            _ => Err(DomainError::UnknownTimeframe(s.to_string())),
        }
    }
}

/// Column the listing table is ordered by (always descending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Price,
    PercentChange1h,
    PercentChange24h,
    PercentChange7d,
    #[default]
    MarketCap,
    Volume24h,
    CirculatingSupply,
}

impl SortField {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::PercentChange1h => "percent_change_1h",
            Self::PercentChange24h => "percent_change_24h",
            Self::PercentChange7d => "percent_change_7d",
            Self::MarketCap => "market_cap",
            Self::Volume24h => "volume_24h",
            Self::CirculatingSupply => "circulating_supply",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "percent_change_1h" | "1h" => Ok(Self::PercentChange1h),
            "percent_change_24h" | "24h" => Ok(Self::PercentChange24h),
            "percent_change_7d" | "7d" => Ok(Self::PercentChange7d),
            "market_cap" => Ok(Self::MarketCap),
            "volume_24h" | "volume" => Ok(Self::Volume24h),
            "circulating_supply" | "supply" => Ok(Self::CirculatingSupply),
            _ => Err(DomainError::UnknownSortField(s.to_string())),
        }
    }
}

/// Curated listing views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingCategory {
    /// Largest 24h gainers first.
    Trending,
    /// Most recently listed first.
    New,
    /// Largest market cap first.
    MostViewed,
}

impl ListingCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trending => "trending",
            Self::New => "new",
            Self::MostViewed => "most_viewed",
        }
    }

    /// Value of the provider's `sort` parameter for this category.
    #[must_use]
    pub fn upstream_sort(&self) -> &'static str {
        match self {
            Self::Trending => "percent_change_24h",
            Self::New => "date_added",
            Self::MostViewed => "market_cap",
        }
    }
}

impl FromStr for ListingCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trending" => Ok(Self::Trending),
            "new" => Ok(Self::New),
            "most_viewed" | "mostviewed" => Ok(Self::MostViewed),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_parsing() {
        assert_eq!("1d".parse::<Timeframe>(), Ok(Timeframe::OneDay));
        assert_eq!("All".parse::<Timeframe>(), Ok(Timeframe::All));
        assert!("2W".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_zoom_bounds_shrink_with_coarser_timeframes() {
        assert_eq!(Timeframe::OneDay.zoom_bounds(), (1.0, 240.0));
        assert_eq!(Timeframe::OneYear.zoom_bounds(), (1.0, 4.0));
        for tf in Timeframe::ALL {
            let (min, max) = tf.zoom_bounds();
            assert!(min >= 1.0 && max > min);
        }
    }

    #[test]
    fn test_category_upstream_sort() {
        let category: ListingCategory = "trending".parse().unwrap();
        assert_eq!(category.upstream_sort(), "percent_change_24h");
        assert!("hot".parse::<ListingCategory>().is_err());
    }

    #[test]
    fn test_chart_mode_parsing() {
        assert_eq!("marketCap".parse::<ChartMode>(), Ok(ChartMode::MarketCap));
        assert_eq!("candlestick".parse::<ChartMode>(), Ok(ChartMode::Candlestick));
    }
}
