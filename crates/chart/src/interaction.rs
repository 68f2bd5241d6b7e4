//! Per-chart interaction state.
//!
//! `Idle -> Panning` on pointer down, back on pointer up; `Idle -> Zooming`
//! on a wheel or pinch step, back when the gesture ends. Changing the mode
//! or the timeframe resets the transform to identity and drops any gesture
//! in progress.

use crate::error::ChartError;
use crate::render::{Frame, render};
use crate::tooltip::{Tooltip, hit_test};
use crate::transform::ZoomTransform;
use crate::viewport::Viewport;
use coinboard_domain::{ChartMode, OhlcvPoint, Timeframe};
use tracing::debug;

/// Wheel delta to zoom exponent; one notch of 100 px zooms by `2^0.2`.
const WHEEL_SENSITIVITY: f64 = 0.002;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    Panning {
        last_x: f64,
    },
    Zooming,
}

/// Mode, timeframe, viewport, transform and gesture of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    mode: ChartMode,
    timeframe: Timeframe,
    viewport: Viewport,
    transform: ZoomTransform,
    interaction: Interaction,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new(ChartMode::default(), Timeframe::default(), Viewport::default())
    }
}

impl ChartState {
    pub fn new(mode: ChartMode, timeframe: Timeframe, viewport: Viewport) -> Self {
        Self {
            mode,
            timeframe,
            viewport,
            transform: ZoomTransform::IDENTITY,
            interaction: Interaction::Idle,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    #[must_use]
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
        self.interaction = Interaction::Idle;
    }

    /// Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: ChartMode) -> bool {
        if self.mode == mode {
            return false;
        }
        debug!(from = ?self.mode, to = ?mode, "Chart mode changed, resetting transform");
        self.mode = mode;
        self.reset();
        true
    }

    /// Returns whether the timeframe changed.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> bool {
        if self.timeframe == timeframe {
            return false;
        }
        debug!(from = %self.timeframe, to = %timeframe, "Timeframe changed, resetting transform");
        self.timeframe = timeframe;
        self.reset();
        true
    }

    /// Resizes the surface and re-clamps the transform.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.transform
            .clamp_to(self.timeframe.zoom_bounds(), viewport.x_range());
    }

    /// Starts a pan. Ignored outside `Idle`.
    pub fn pointer_down(&mut self, x: f64) -> bool {
        if self.interaction != Interaction::Idle {
            return false;
        }
        self.interaction = Interaction::Panning { last_x: x };
        true
    }

    /// Pans by the pointer delta while panning; a no-op otherwise.
    pub fn pointer_move(&mut self, x: f64) -> bool {
        let Interaction::Panning { last_x } = self.interaction else {
            return false;
        };
        self.transform.pan_by(x - last_x, self.viewport.x_range());
        self.interaction = Interaction::Panning { last_x: x };
        true
    }

    pub fn pointer_up(&mut self) -> bool {
        if !matches!(self.interaction, Interaction::Panning { .. }) {
            return false;
        }
        self.interaction = Interaction::Idle;
        true
    }

    /// Zooms around `anchor_x` by a wheel delta (negative zooms in).
    pub fn wheel(&mut self, anchor_x: f64, delta_y: f64) -> bool {
        self.pinch(anchor_x, 2f64.powf(-delta_y * WHEEL_SENSITIVITY))
    }

    /// Zooms around `anchor_x` by `factor`. Ignored while panning.
    pub fn pinch(&mut self, anchor_x: f64, factor: f64) -> bool {
        if matches!(self.interaction, Interaction::Panning { .. }) {
            return false;
        }
        self.interaction = Interaction::Zooming;
        self.transform.zoom_at(
            anchor_x,
            factor,
            self.timeframe.zoom_bounds(),
            self.viewport.x_range(),
        );
        true
    }

    pub fn gesture_end(&mut self) -> bool {
        if self.interaction != Interaction::Zooming {
            return false;
        }
        self.interaction = Interaction::Idle;
        true
    }

    /// Renders `points` with the current state.
    ///
    /// # Errors
    /// See [`render`].
    pub fn frame(&self, points: &[OhlcvPoint]) -> Result<Frame, ChartError> {
        render(points, self.mode, &self.viewport, &self.transform, self.timeframe)
    }

    /// Tooltip for the pointer at `x` over `frame`.
    #[must_use]
    pub fn hover(&self, points: &[OhlcvPoint], frame: &Frame, x: f64) -> Option<Tooltip> {
        hit_test(points, frame, &self.viewport, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoomed() -> ChartState {
        let mut state = ChartState::default();
        state.wheel(400.0, -500.0);
        state
    }

    #[test]
    fn test_pan_cycle() {
        let mut state = zoomed();
        state.gesture_end();
        assert!(state.pointer_down(400.0));
        assert_eq!(state.interaction(), Interaction::Panning { last_x: 400.0 });

        let before = state.transform().tx;
        assert!(state.pointer_move(420.0));
        assert_eq!(state.transform().tx, before + 20.0);

        assert!(state.pointer_up());
        assert_eq!(state.interaction(), Interaction::Idle);
        assert!(!state.pointer_move(500.0));
    }

    #[test]
    fn test_zoom_cycle() {
        let mut state = ChartState::default();
        assert!(state.wheel(400.0, -100.0));
        assert_eq!(state.interaction(), Interaction::Zooming);
        assert!(state.transform().k > 1.0);
        // pointer down is not a transition out of Zooming
        assert!(!state.pointer_down(10.0));
        assert!(state.gesture_end());
        assert_eq!(state.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_wheel_ignored_while_panning() {
        let mut state = ChartState::default();
        state.pointer_down(100.0);
        assert!(!state.wheel(100.0, -100.0));
        assert!(state.transform().is_identity());
    }

    #[test]
    fn test_zoom_clamped_per_timeframe() {
        let mut state = ChartState::new(ChartMode::Price, Timeframe::OneYear, Viewport::default());
        state.pinch(400.0, 1_000.0);
        assert_eq!(state.transform().k, 4.0);
        state.pinch(400.0, 1e-6);
        assert_eq!(state.transform().k, 1.0);
    }

    #[test]
    fn test_mode_change_resets_transform_mid_pan() {
        let mut state = zoomed();
        state.gesture_end();
        state.pointer_down(300.0);
        state.pointer_move(350.0);
        assert!(!state.transform().is_identity());

        assert!(state.set_mode(ChartMode::Candlestick));
        assert!(state.transform().is_identity());
        assert_eq!(state.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_timeframe_change_resets_transform_mid_zoom() {
        let mut state = zoomed();
        assert_eq!(state.interaction(), Interaction::Zooming);

        assert!(state.set_timeframe(Timeframe::OneMonth));
        assert_eq!(state.transform(), ZoomTransform::IDENTITY);
        assert_eq!(state.interaction(), Interaction::Idle);
        assert!(!state.set_timeframe(Timeframe::OneMonth));
    }

    #[test]
    fn test_viewport_shrink_reclamps() {
        let mut state = zoomed();
        state.set_viewport(Viewport::new(300.0, 200.0));
        let (x0, x1) = state.viewport().x_range();
        let (w0, w1) = state.transform().visible_window((x0, x1));
        assert!(w0 >= x0 - 1e-9 && w1 <= x1 + 1e-9);
    }
}
