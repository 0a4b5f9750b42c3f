//! Sync tracker configuration constants.
//!
//! Polling cadence and the bounds on how long tracking may take.

use std::time::Duration;

/// Interval between two sync checks (in seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// How long to wait for both clients before giving up (in seconds).
pub const DEFAULT_SYNC_DEADLINE_SECS: u64 = 300;

/// Upper bound on a single endpoint query (in seconds).
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    pub poll_interval: Duration,
    pub deadline: Duration,
    pub query_timeout: Duration,
}

impl TrackerConfig {
    pub fn new(poll_interval: Duration, deadline: Duration) -> Self {
        Self {
            poll_interval,
            deadline,
            ..Self::default()
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Number of ticks the deadline allows, counting the first one.
    pub fn max_ticks(&self) -> Option<u64> {
        if self.poll_interval.is_zero() {
            return None;
        }
        let interval = self.poll_interval.as_nanos();
        let ticks = self.deadline.as_nanos().div_ceil(interval);
        Some(u64::try_from(ticks.max(1)).unwrap_or(u64::MAX))
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            deadline: Duration::from_secs(DEFAULT_SYNC_DEADLINE_SECS),
            query_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
        }
    }
}
