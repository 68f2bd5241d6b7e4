//! Synthetic market data for the coinboard chart.
//!
//! - [`price_path`]: OHLCV series generators
//! - [`feed`]: a real-time feed that ticks a series forward on an interval

pub mod error;
pub mod feed;
pub mod price_path;
pub mod prelude;

pub use error::SimulationError;
