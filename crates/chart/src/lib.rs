//! Interactive OHLCV chart engine.
//!
//! Turns an ascending OHLCV series into backend-agnostic draw commands and
//! handles pointer-driven navigation:
//! - [`scale`]: time and value scales, axis ticks
//! - [`transform`]: zoom/pan transform clamped per timeframe
//! - [`render`]: line/area and candlestick frames
//! - [`tooltip`]: nearest-point hit-testing
//! - [`interaction`]: the Idle/Panning/Zooming state machine

pub mod error;
pub mod interaction;
pub mod path;
pub mod render;
pub mod scale;
pub mod style;
pub mod tooltip;
pub mod transform;
pub mod viewport;

pub use error::ChartError;
pub use interaction::{ChartState, Interaction};
pub use render::{DrawCommand, Frame, render};
pub use tooltip::{Tooltip, hit_test, nearest_index};
pub use transform::ZoomTransform;
pub use viewport::{Margins, Viewport};
