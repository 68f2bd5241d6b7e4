//! Horizontal zoom/pan transform.
//!
//! The transform maps base pixel positions `x` to `k * x + tx`. It only
//! ever touches the time axis. `k` stays within the timeframe's zoom bounds
//! and `tx` keeps the visible window inside the plot extent, i.e.
//! `x1 * (1 - k) <= tx <= x0 * (1 - k)` for a plot range `[x0, x1]`.

use crate::scale::TimeScale;
use serde::{Deserialize, Serialize};

/// Scale factor plus horizontal translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub tx: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, tx: 0.0 };

    /// Builds a transform and clamps it into `bounds` and `range`.
    pub fn new(k: f64, tx: f64, bounds: (f64, f64), range: (f64, f64)) -> Self {
        let mut t = Self {
            k: clamp_scale(k, bounds),
            tx,
        };
        t.clamp_translation(range);
        t
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        x * self.k + self.tx
    }

    #[must_use]
    pub fn invert(&self, x: f64) -> f64 {
        (x - self.tx) / self.k
    }

    /// Scales by `factor` around the screen position `anchor`, keeping the
    /// content under the anchor in place unless a clamp kicks in.
    pub fn zoom_at(&mut self, anchor: f64, factor: f64, bounds: (f64, f64), range: (f64, f64)) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let content = self.invert(anchor);
        self.k = clamp_scale(self.k * factor, bounds);
        self.tx = anchor - content * self.k;
        self.clamp_translation(range);
    }

    /// Shifts by `dx` screen pixels.
    pub fn pan_by(&mut self, dx: f64, range: (f64, f64)) {
        self.tx += dx;
        self.clamp_translation(range);
    }

    /// Re-applies the scale clamp, e.g. after the timeframe changed.
    pub fn clamp_to(&mut self, bounds: (f64, f64), range: (f64, f64)) {
        self.k = clamp_scale(self.k, bounds);
        self.clamp_translation(range);
    }

    fn clamp_translation(&mut self, (x0, x1): (f64, f64)) {
        let lowest = x1 * (1.0 - self.k);
        let highest = x0 * (1.0 - self.k);
        self.tx = self.tx.clamp(lowest.min(highest), highest.max(lowest));
    }

    /// Base pixel window currently on screen.
    #[must_use]
    pub fn visible_window(&self, (x0, x1): (f64, f64)) -> (f64, f64) {
        (self.invert(x0), self.invert(x1))
    }

    /// Time window currently on screen for a base scale over the full series.
    #[must_use]
    pub fn visible_domain(&self, base: &TimeScale) -> (i64, i64) {
        let (w0, w1) = self.visible_window(base.range);
        (base.invert(w0), base.invert(w1))
    }
}

fn clamp_scale(k: f64, (min, max): (f64, f64)) -> f64 {
    if k.is_nan() {
        return min;
    }
    k.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: (f64, f64) = (50.0, 840.0);
    const ONE_DAY: (f64, f64) = (1.0, 240.0);
    const ONE_YEAR: (f64, f64) = (1.0, 4.0);

    #[test]
    fn test_zoom_clamps_to_bounds() {
        let mut t = ZoomTransform::IDENTITY;
        t.zoom_at(400.0, 10.0, ONE_YEAR, RANGE);
        assert_eq!(t.k, 4.0);

        t.zoom_at(400.0, 1_000.0, ONE_DAY, RANGE);
        assert_eq!(t.k, 240.0);

        t.zoom_at(400.0, 1e-9, ONE_DAY, RANGE);
        assert_eq!(t.k, 1.0);
        assert_eq!(t.tx, 0.0);
    }

    #[test]
    fn test_zoom_keeps_anchor_content_fixed() {
        let mut t = ZoomTransform::IDENTITY;
        let before = t.invert(445.0);
        t.zoom_at(445.0, 2.0, ONE_DAY, RANGE);
        assert!((t.invert(445.0) - before).abs() < 1e-9);
        assert_eq!(t.k, 2.0);
    }

    #[test]
    fn test_pan_stays_within_extent() {
        let mut t = ZoomTransform::IDENTITY;
        t.pan_by(300.0, RANGE);
        assert_eq!(t, ZoomTransform::IDENTITY);

        t.zoom_at(445.0, 4.0, ONE_DAY, RANGE);
        t.pan_by(1e6, RANGE);
        let (w0, _) = t.visible_window(RANGE);
        assert!((w0 - RANGE.0).abs() < 1e-9);

        t.pan_by(-1e6, RANGE);
        let (_, w1) = t.visible_window(RANGE);
        assert!((w1 - RANGE.1).abs() < 1e-9);
    }

    #[test]
    fn test_visible_domain_at_identity_is_full_extent() {
        let base = TimeScale::new((0, 1_000), RANGE);
        assert_eq!(ZoomTransform::IDENTITY.visible_domain(&base), (0, 1_000));

        let mut t = ZoomTransform::IDENTITY;
        t.zoom_at(RANGE.0, 2.0, ONE_DAY, RANGE);
        assert_eq!(t.visible_domain(&base), (0, 500));
    }

    #[test]
    fn test_new_clamps() {
        let t = ZoomTransform::new(9.0, 0.0, ONE_YEAR, RANGE);
        assert_eq!(t.k, 4.0);
        assert!(t.tx <= RANGE.0 * (1.0 - 4.0));
    }
}
