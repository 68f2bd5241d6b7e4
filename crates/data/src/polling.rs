//! Periodic listings refresh.
//!
//! The polling task owns nothing but an `Arc` to the dashboard. Its handle
//! aborts the task when dropped, so a torn-down view never receives updates.

use crate::dashboard::Dashboard;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Default polling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Handle to a running polling task.
pub struct PollingHandle {
    task: Option<JoinHandle<()>>,
    refreshes: Arc<AtomicU64>,
}

impl PollingHandle {
    /// Number of refreshes issued so far.
    #[must_use]
    pub fn refreshes(&self) -> u64 {
        self.refreshes.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops polling and waits for the task to wind down.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        info!("Polling stopped");
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Refreshes listings every `every`, starting immediately.
///
/// A tick that finds a request still in flight is skipped rather than
/// queued.
pub fn spawn_polling(dashboard: Arc<Dashboard>, every: Duration) -> PollingHandle {
    let refreshes = Arc::new(AtomicU64::new(0));
    let counter = refreshes.clone();

    info!(interval_secs = every.as_secs(), "Starting listings polling");
    let task = tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if dashboard.is_loading().await {
                debug!("Previous refresh still in flight, skipping tick");
                continue;
            }
            counter.fetch_add(1, Ordering::SeqCst);
            let outcome = dashboard.refresh_listings().await;
            debug!(outcome = ?outcome, "Polling refresh completed");
        }
    });

    PollingHandle {
        task: Some(task),
        refreshes,
    }
}
