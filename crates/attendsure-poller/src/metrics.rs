//! Metrics collection for poll sessions

use std::time::Duration;

/// Counters kept by one poll session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollMetrics {
    /// Fetches issued, successful or not
    pub fetch_attempts: u64,

    /// Fetches that failed and were retried
    pub fetch_failures: u64,

    /// Snapshots handed to the consumer
    pub snapshots_delivered: u64,

    /// Fetch results that resolved after cancellation and were dropped
    pub results_discarded: u64,

    /// Time from session start to the last recorded event
    pub elapsed: Duration,
}

impl PollMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetch being issued
    pub fn record_attempt(&mut self) {
        self.fetch_attempts += 1;
    }

    /// Record a failed fetch
    pub fn record_failure(&mut self) {
        self.fetch_failures += 1;
    }

    /// Record a snapshot delivery
    pub fn record_delivery(&mut self) {
        self.snapshots_delivered += 1;
    }

    /// Record a result dropped after cancellation
    pub fn record_discard(&mut self) {
        self.results_discarded += 1;
    }

    /// Generate a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} fetches ({} failed), {} snapshots delivered, {} discarded, {:.1}s elapsed",
            self.fetch_attempts,
            self.fetch_failures,
            self.snapshots_delivered,
            self.results_discarded,
            self.elapsed.as_secs_f64()
        )
    }
}
