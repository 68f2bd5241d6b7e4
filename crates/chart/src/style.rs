//! Colours and fixed drawing parameters.

use coinboard_domain::{CandleDirection, ChartMode};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const PRICE: Color = Color::rgb(0xff, 0x00, 0x00);
pub const MARKET_CAP: Color = Color::rgb(0x00, 0x57, 0xff);
pub const BULLISH: Color = Color::rgb(0x4c, 0xaf, 0x50);
pub const BEARISH: Color = Color::rgb(0xff, 0x00, 0x00);
pub const AXIS: Color = Color::rgb(0x9c, 0xa3, 0xaf);
pub const HOVER_LINE: Color = Color::rgb(0xcc, 0xcc, 0xcc);

pub const LINE_WIDTH: f64 = 2.0;
pub const WICK_WIDTH: f64 = 2.5;
pub const GRADIENT_TOP_OPACITY: f64 = 0.6;
pub const MIN_CANDLE_WIDTH: f64 = 5.0;
pub const CANDLE_GAP: f64 = 2.0;
pub const MIN_BODY_HEIGHT: f64 = 4.0;
pub const BODY_CORNER_RADIUS: f64 = 3.0;
pub const HOVER_DASH: f64 = 4.0;
pub const TEXT_SIZE: f64 = 12.0;

/// Line/area colour for a series mode.
#[must_use]
pub fn series_color(mode: ChartMode) -> Color {
    match mode {
        ChartMode::MarketCap => MARKET_CAP,
        ChartMode::Price | ChartMode::Candlestick => PRICE,
    }
}

#[must_use]
pub fn candle_color(direction: CandleDirection) -> Color {
    match direction {
        CandleDirection::Bullish => BULLISH,
        CandleDirection::Bearish => BEARISH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_display() {
        assert_eq!(MARKET_CAP.to_string(), "#0057ff");
        assert_eq!(BULLISH.to_string(), "#4caf50");
        assert_eq!(serde_json::to_string(&PRICE).unwrap(), "\"#ff0000\"");
    }
}
