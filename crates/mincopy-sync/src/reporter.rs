//! Periodic activity summaries

use mincopy_types::{ActivityCounters, ActivitySnapshot};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Default time between two summaries
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Drains [`ActivityCounters`] on a fixed interval and logs what happened
#[derive(Debug, Clone)]
pub struct ActivityReporter {
    counters: ActivityCounters,
    period: Duration,
}

impl ActivityReporter {
    /// Create a reporter for `counters` ticking every `period`
    pub fn new(counters: ActivityCounters, period: Duration) -> Self {
        Self { counters, period }
    }

    /// Time between two summaries
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drain the counters, logging a summary if anything happened
    pub fn report_once(&self) -> Option<ActivitySnapshot> {
        let snapshot = self.counters.take();
        if snapshot.is_idle() {
            return None;
        }

        info!("{}", snapshot);
        Some(snapshot)
    }

    /// Report forever
    pub async fn run(self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.report_once();
        }
    }
}
