pub mod asset;
pub mod dominance;
pub mod ohlcv;
pub mod sentiment;

// Re-export for easier access
pub use asset::{AssetRecord, Quote};
pub use dominance::DominanceSlice;
pub use ohlcv::{CandleDirection, OhlcvPoint};
pub use sentiment::{SentimentClass, SentimentIndex};
