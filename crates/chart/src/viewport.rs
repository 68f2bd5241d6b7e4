//! Drawing surface geometry.

use serde::{Deserialize, Serialize};

/// Space reserved around the plot area for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 60.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

/// Surface size plus margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(900.0, 400.0)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Horizontal pixel range of the plot area, left to right.
    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (self.margins.left, self.width - self.margins.right)
    }

    /// Vertical pixel range of the plot area, bottom to top.
    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        (self.height - self.margins.bottom, self.margins.top)
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }

    /// Whether `x` lies within the plot area horizontally.
    #[must_use]
    pub fn contains_x(&self, x: f64) -> bool {
        let (x0, x1) = self.x_range();
        (x0..=x1).contains(&x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plot_area() {
        let vp = Viewport::default();
        assert_eq!(vp.x_range(), (50.0, 840.0));
        assert_eq!(vp.y_range(), (370.0, 20.0));
        assert_eq!(vp.plot_width(), 790.0);
        assert_eq!(vp.plot_height(), 350.0);
        assert!(vp.contains_x(50.0));
        assert!(!vp.contains_x(841.0));
    }
}
