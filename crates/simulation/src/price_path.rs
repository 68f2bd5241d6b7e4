//! Synthetic OHLCV series.
//!
//! Every point is drawn independently around a base price: the close and
//! open sit within a body jitter of a centre price, the wicks extend past the
//! body by up to a wick jitter, and the volume is uniform in `[0, max)`.

use crate::error::SimulationError;
use chrono::{DateTime, Utc};
use coinboard_domain::{OhlcvPoint, Timeframe};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Default number of points in a generated series.
pub const DEFAULT_SERIES_LEN: usize = 40;

/// Produces OHLCV points.
pub trait SeriesGenerator {
    /// One point stamped `timestamp_ms`.
    fn next_point(&mut self, timestamp_ms: i64) -> OhlcvPoint;

    /// `len` points spaced by the timeframe's point spacing, the last one
    /// stamped `end`, ascending by time.
    fn generate(
        &mut self,
        timeframe: Timeframe,
        end: DateTime<Utc>,
        len: usize,
    ) -> Vec<OhlcvPoint> {
        let spacing = timeframe.point_spacing().num_milliseconds();
        let end_ms = end.timestamp_millis();
        (0..len)
            .rev()
            .map(|back| self.next_point(end_ms - back as i64 * spacing))
            .collect()
    }
}

/// Parameters of [`RandomOhlcv`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticParams {
    pub base_price: f64,
    /// Centre price is uniform in `base_price ± price_jitter`.
    pub price_jitter: f64,
    /// Open and close are uniform in `centre ± body_jitter`.
    pub body_jitter: f64,
    /// Wicks extend up to this far past the body.
    pub wick_jitter: f64,
    pub max_volume: f64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            base_price: 50_000.0,
            price_jitter: 1_000.0,
            body_jitter: 50.0,
            wick_jitter: 100.0,
            max_volume: 100_000.0,
        }
    }
}

/// Independent uniform draws around a fixed base price.
pub struct RandomOhlcv<R> {
    rng: R,
    centre: Uniform<f64>,
    body: Uniform<f64>,
    wick: Uniform<f64>,
    volume: Uniform<f64>,
}

impl<R: Rng> RandomOhlcv<R> {
    /// # Errors
    /// Returns [`SimulationError::InvalidParameter`] when a jitter or the
    /// volume bound is not strictly positive and finite.
    pub fn new(params: SyntheticParams, rng: R) -> Result<Self, SimulationError> {
        let span = |name: &'static str, low: f64, high: f64| {
            Uniform::new(low, high).map_err(|e| SimulationError::InvalidParameter {
                name,
                reason: e.to_string(),
            })
        };
        Ok(Self {
            rng,
            centre: span(
                "price_jitter",
                params.base_price - params.price_jitter,
                params.base_price + params.price_jitter,
            )?,
            body: span("body_jitter", -params.body_jitter, params.body_jitter)?,
            wick: span("wick_jitter", 0.0, params.wick_jitter)?,
            volume: span("max_volume", 0.0, params.max_volume)?,
        })
    }
}

impl<R: Rng> SeriesGenerator for RandomOhlcv<R> {
    fn next_point(&mut self, timestamp_ms: i64) -> OhlcvPoint {
        let centre = self.centre.sample(&mut self.rng);
        let open = centre + self.body.sample(&mut self.rng);
        let close = centre + self.body.sample(&mut self.rng);
        let high = open.max(close) + self.wick.sample(&mut self.rng);
        let low = open.min(close) - self.wick.sample(&mut self.rng);
        let volume = self.volume.sample(&mut self.rng);
        OhlcvPoint::new(timestamp_ms, open, high, low, close, volume)
    }
}

/// Replays a fixed list of closes as flat candles, cycling when exhausted.
pub struct DeterministicSeries {
    pub closes: Vec<f64>,
    cursor: usize,
}

impl DeterministicSeries {
    pub fn new(closes: Vec<f64>) -> Self {
        Self { closes, cursor: 0 }
    }
}

impl SeriesGenerator for DeterministicSeries {
    fn next_point(&mut self, timestamp_ms: i64) -> OhlcvPoint {
        let close = match self.closes.len() {
            0 => 0.0,
            n => self.closes[self.cursor % n],
        };
        self.cursor += 1;
        OhlcvPoint::new(timestamp_ms, close, close, close, close, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinboard_domain::entities::ohlcv::validate_series;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generator() -> RandomOhlcv<StdRng> {
        RandomOhlcv::new(SyntheticParams::default(), StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_generated_points_are_well_formed() {
        let end = Utc::now();
        let series = generator().generate(Timeframe::OneDay, end, DEFAULT_SERIES_LEN);

        assert_eq!(series.len(), 40);
        assert!(validate_series(&series).is_ok());
        assert_eq!(series.last().unwrap().timestamp_ms, end.timestamp_millis());
        for p in &series {
            assert!(p.high >= p.open.max(p.close));
            assert!(p.low <= p.open.min(p.close));
            assert!((48_950.0..=51_050.0).contains(&p.open));
            assert!((48_950.0..=51_050.0).contains(&p.close));
            assert!((0.0..100_000.0).contains(&p.volume));
        }
    }

    #[test]
    fn test_spacing_follows_timeframe() {
        let end = Utc::now();
        for tf in Timeframe::ALL {
            let series = generator().generate(tf, end, 5);
            let expected = tf.point_spacing().num_milliseconds();
            assert!(series.windows(2).all(|w| w[1].timestamp_ms - w[0].timestamp_ms == expected));
        }
    }

    #[test]
    fn test_rejects_empty_ranges() {
        let params = SyntheticParams {
            body_jitter: 0.0,
            ..Default::default()
        };
        let err = RandomOhlcv::new(params, StdRng::seed_from_u64(1)).err().unwrap();
        assert!(matches!(err, SimulationError::InvalidParameter { name: "body_jitter", .. }));
    }

    #[test]
    fn test_deterministic_series_cycles() {
        let mut series = DeterministicSeries::new(vec![1.0, 2.0]);
        let closes: Vec<f64> = (0..3).map(|t| series.next_point(t).close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 1.0]);
    }
}
