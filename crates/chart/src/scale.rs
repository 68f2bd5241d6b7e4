//! Linear scales and axis ticks.

use chrono::DateTime;
use coinboard_domain::OhlcvPoint;
use serde::{Deserialize, Serialize};

/// Padding applied below the lowest low and above the highest high.
pub const VALUE_PADDING: f64 = 0.02;

const MAX_ITERATIONS: usize = 1000;

/// Maps millisecond timestamps onto a horizontal pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    pub domain: (i64, i64),
    pub range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (i64, i64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over the first and last timestamps of an ascending series.
    #[must_use]
    pub fn over(points: &[OhlcvPoint], range: (f64, f64)) -> Option<Self> {
        let first = points.first()?.timestamp_ms;
        let last = points.last()?.timestamp_ms;
        Some(Self::new((first, last), range))
    }

    fn span(&self) -> i64 {
        self.domain.1 - self.domain.0
    }

    /// Pixel position of `t`. A degenerate domain maps to the middle of the
    /// range.
    #[must_use]
    pub fn map(&self, t: i64) -> f64 {
        let (r0, r1) = self.range;
        if self.span() == 0 {
            return (r0 + r1) / 2.0;
        }
        let ratio = (t - self.domain.0) as f64 / self.span() as f64;
        r0 + ratio * (r1 - r0)
    }

    /// Timestamp at pixel `x`.
    #[must_use]
    pub fn invert(&self, x: f64) -> i64 {
        let (r0, r1) = self.range;
        if self.span() == 0 || r1 == r0 {
            return self.domain.0;
        }
        let ratio = (x - r0) / (r1 - r0);
        self.domain.0
            .saturating_add((ratio * self.span() as f64).round() as i64)
    }

    /// `count` evenly spaced timestamps across the domain, endpoints included.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<i64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.domain.0],
            _ if self.span() == 0 => vec![self.domain.0],
            _ => {
                let step = self.span() as f64 / (count - 1) as f64;
                (0..count)
                    .map(|i| self.domain.0 + (step * i as f64).round() as i64)
                    .collect()
            }
        }
    }
}

/// Maps prices onto a vertical pixel range (bottom to top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl ValueScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[must_use]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    #[must_use]
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (y - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// `[min(low) * 0.98, max(high) * 1.02]` over `points`.
#[must_use]
pub fn padded_value_domain(points: &[OhlcvPoint]) -> Option<(f64, f64)> {
    let low = points.iter().map(|p| p.low).reduce(f64::min)?;
    let high = points.iter().map(|p| p.high).reduce(f64::max)?;
    Some((low * (1.0 - VALUE_PADDING), high * (1.0 + VALUE_PADDING)))
}

/// Step and rounded top for roughly `labels_can_fit` value labels.
fn calc_optimal_ticks(highest: f64, lowest: f64, labels_can_fit: usize) -> (f64, f64) {
    let range = (highest - lowest).abs().max(f64::EPSILON);
    let labels = labels_can_fit.max(1) as f64;

    let base = 10.0f64.powf(range.log10().floor());

    let step = match range / base {
        r if r <= labels * 0.1 => 0.1 * base,
        r if r <= labels * 0.2 => 0.2 * base,
        r if r <= labels * 0.5 => 0.5 * base,
        r if r <= labels => base,
        r if r <= labels * 2.0 => 2.0 * base,
        _ => (range / labels).min(5.0 * base),
    };

    let rounded_highest = (highest / step).ceil() * step;
    (step, rounded_highest)
}

/// Round-numbered value ticks inside `[lowest, highest]`, top down.
#[must_use]
pub fn value_ticks(lowest: f64, highest: f64, labels_can_fit: usize) -> Vec<f64> {
    if !lowest.is_finite() || !highest.is_finite() || (highest - lowest).abs() < f64::EPSILON {
        return Vec::new();
    }

    let (step, max) = calc_optimal_ticks(highest, lowest, labels_can_fit);
    let mut value = max;
    while value > highest {
        value -= step;
    }

    let mut ticks = Vec::with_capacity(labels_can_fit + 2);
    let mut safety_counter = 0;
    while value >= lowest && safety_counter < MAX_ITERATIONS {
        ticks.push(value);
        value -= step;
        safety_counter += 1;
    }
    ticks
}

/// Formats a timestamp with a `strftime` pattern; unrepresentable
/// timestamps yield an empty label.
#[must_use]
pub fn format_time(timestamp_ms: i64, pattern: &str) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format(pattern).to_string())
        .unwrap_or_default()
}

/// Value label with decimals chosen from the tick step.
#[must_use]
pub fn format_value(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{value:.decimals$}")
}
