//! Real-time tick feed.
//!
//! On every tick the feed builds a new series with the oldest point dropped
//! and a fresh one appended, then publishes it as a new `Arc`. Snapshots
//! already handed out are never touched.

use crate::error::SimulationError;
use crate::price_path::{DEFAULT_SERIES_LEN, RandomOhlcv, SeriesGenerator, SyntheticParams};
use chrono::Utc;
use coinboard_domain::{OhlcvPoint, Timeframe};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

/// Default tick period.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(10);

/// Shared, immutable series snapshot.
pub type SeriesSnapshot = Arc<Vec<OhlcvPoint>>;

/// A running feed. Dropping it stops the ticks.
pub struct RealtimeFeed {
    rx: watch::Receiver<SeriesSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl RealtimeFeed {
    /// Starts ticking `initial` forward every `every`.
    ///
    /// # Errors
    /// Returns [`SimulationError::EmptySeries`] if `initial` is empty.
    pub fn spawn<G>(
        initial: Vec<OhlcvPoint>,
        mut generator: G,
        every: Duration,
    ) -> Result<Self, SimulationError>
    where
        G: SeriesGenerator + Send + 'static,
    {
        if initial.is_empty() {
            return Err(SimulationError::EmptySeries);
        }
        let (tx, rx) = watch::channel(Arc::new(initial));

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            loop {
                ticker.tick().await;
                let current = tx.borrow().clone();
                let Some(last) = current.last() else {
                    break;
                };
                // wall clock may not advance between ticks under a paused runtime
                let stamp = Utc::now().timestamp_millis().max(last.timestamp_ms + 1);

                let mut next = Vec::with_capacity(current.len());
                next.extend_from_slice(&current[1..]);
                next.push(generator.next_point(stamp));
                debug!(timestamp_ms = stamp, len = next.len(), "Series tick");
                tx.send_replace(Arc::new(next));
            }
        });

        Ok(Self { rx, task: Some(task) })
    }

    /// Starts a feed over a fresh random series for `timeframe`.
    ///
    /// # Errors
    /// Returns an error if `params` describe an empty range or `len` is zero.
    pub fn synthetic(
        timeframe: Timeframe,
        len: usize,
        params: SyntheticParams,
        every: Duration,
    ) -> Result<Self, SimulationError> {
        let mut generator = RandomOhlcv::new(params, StdRng::from_os_rng())?;
        let initial = generator.generate(timeframe, Utc::now(), len);
        info!(timeframe = %timeframe, len, "Starting synthetic feed");
        Self::spawn(initial, generator, every)
    }

    /// Default synthetic feed: 40 points, ticking every 10 seconds.
    ///
    /// # Errors
    /// See [`RealtimeFeed::synthetic`].
    pub fn with_defaults(timeframe: Timeframe) -> Result<Self, SimulationError> {
        Self::synthetic(
            timeframe,
            DEFAULT_SERIES_LEN,
            SyntheticParams::default(),
            DEFAULT_TICK_INTERVAL,
        )
    }

    /// Current series.
    #[must_use]
    pub fn snapshot(&self) -> SeriesSnapshot {
        self.rx.borrow().clone()
    }

    /// Receiver notified on every tick.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SeriesSnapshot> {
        self.rx.clone()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for RealtimeFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_path::DeterministicSeries;

    fn initial() -> Vec<OhlcvPoint> {
        DeterministicSeries::new(vec![1.0, 2.0, 3.0])
            .generate(Timeframe::OneDay, Utc::now(), 3)
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_appends_newest_and_drops_oldest() {
        let feed = RealtimeFeed::spawn(initial(), DeterministicSeries::new(vec![9.0]), DEFAULT_TICK_INTERVAL).unwrap();
        let before = feed.snapshot();
        let mut rx = feed.subscribe();

        rx.changed().await.unwrap();
        let after = feed.snapshot();

        assert_eq!(after.len(), 3);
        assert_eq!(after[0], before[1]);
        assert_eq!(after[2].close, 9.0);
        assert!(after[2].timestamp_ms > before[2].timestamp_ms);
        // the earlier snapshot is untouched
        assert_eq!(before[0].close, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_interval() {
        let feed = RealtimeFeed::spawn(initial(), DeterministicSeries::new(vec![9.0]), DEFAULT_TICK_INTERVAL).unwrap();
        let before = feed.snapshot();
        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(Arc::ptr_eq(&before, &feed.snapshot()));
        assert!(feed.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let feed = RealtimeFeed::spawn(initial(), DeterministicSeries::new(vec![9.0]), DEFAULT_TICK_INTERVAL).unwrap();
        let mut rx = feed.subscribe();
        drop(feed);
        // sender goes away with the aborted task
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_series_is_rejected() {
        let err = RealtimeFeed::spawn(Vec::new(), DeterministicSeries::new(vec![]), DEFAULT_TICK_INTERVAL).err();
        assert_eq!(err, Some(SimulationError::EmptySeries));
    }

    #[tokio::test(start_paused = true)]
    async fn test_synthetic_defaults() {
        let feed = RealtimeFeed::with_defaults(Timeframe::SevenDays).unwrap();
        assert_eq!(feed.snapshot().len(), DEFAULT_SERIES_LEN);
    }
}
