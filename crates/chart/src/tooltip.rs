//! Nearest-point hit-testing.

use crate::render::{DrawCommand, Frame};
use crate::style;
use crate::viewport::Viewport;
use coinboard_domain::OhlcvPoint;
use serde::Serialize;

/// Point under the pointer and where to draw its guide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tooltip {
    pub index: usize,
    /// Snapped x-pixel of the chosen point.
    pub x: f64,
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Tooltip {
    /// Dashed vertical guide through the chosen point.
    #[must_use]
    pub fn guide(&self, viewport: &Viewport) -> DrawCommand {
        let (y_bottom, y_top) = viewport.y_range();
        DrawCommand::HoverLine {
            x: self.x,
            y_top,
            y_bottom,
            stroke: style::HOVER_LINE,
            dash: style::HOVER_DASH,
        }
    }

    /// Text shown next to the pointer.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "Open: {:.2}\nClose: {:.2}\nHigh: {:.2}\nLow: {:.2}",
            self.open, self.close, self.high, self.low
        )
    }
}

/// Index of the point nearest to `timestamp_ms` in an ascending series.
///
/// On equal distance the earlier point wins.
#[must_use]
pub fn nearest_index(points: &[OhlcvPoint], timestamp_ms: i64) -> Option<usize> {
    if points.is_empty() {
        return None;
    }
    let after = points.partition_point(|p| p.timestamp_ms < timestamp_ms);
    if after == 0 {
        return Some(0);
    }
    if after == points.len() {
        return Some(points.len() - 1);
    }
    let before_gap = timestamp_ms.abs_diff(points[after - 1].timestamp_ms);
    let after_gap = points[after].timestamp_ms.abs_diff(timestamp_ms);
    if before_gap <= after_gap {
        Some(after - 1)
    } else {
        Some(after)
    }
}

/// Hit-tests the pointer at `pointer_x` against a rendered frame.
///
/// Returns `None` when the pointer is outside the plot area, which is also
/// how a pointer leave is expressed.
#[must_use]
pub fn hit_test(
    points: &[OhlcvPoint],
    frame: &Frame,
    viewport: &Viewport,
    pointer_x: f64,
) -> Option<Tooltip> {
    if !viewport.contains_x(pointer_x) {
        return None;
    }
    let target = frame.time_scale.invert(pointer_x);
    let index = nearest_index(points, target)?;
    let p = &points[index];
    Some(Tooltip {
        index,
        x: frame.time_scale.map(p.timestamp_ms),
        timestamp_ms: p.timestamp_ms,
        open: p.open,
        high: p.high,
        low: p.low,
        close: p.close,
    })
}
