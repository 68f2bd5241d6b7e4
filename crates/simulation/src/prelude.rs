//! Prelude module for convenient imports.
//!
//! ```rust
//! use coinboard_simulation::prelude::*;
//! ```

pub use crate::error::SimulationError;
pub use crate::feed::{DEFAULT_TICK_INTERVAL, RealtimeFeed, SeriesSnapshot};
pub use crate::price_path::{
    DEFAULT_SERIES_LEN, DeterministicSeries, RandomOhlcv, SeriesGenerator, SyntheticParams,
};
