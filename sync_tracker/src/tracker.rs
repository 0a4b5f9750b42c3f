use tokio::sync::watch;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::http::HttpSyncQuery;
use crate::query::{Endpoint, QueryError, SyncQuery};
use crate::states::TrackerState;
use crate::status::SyncStatus;

/// Final outcome of a tracking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub state: TrackerState,
    pub status: SyncStatus,
    pub ticks: u64,
}

impl SyncReport {
    pub fn is_fatal(&self) -> bool {
        self.state.is_fatal()
    }

    pub fn is_synced(&self) -> bool {
        self.state == TrackerState::Synced
    }
}

type QueryResult = Option<Result<bool, QueryError>>;

/// Polls both clients until they are synced, the deadline passes, or tracking
/// is cancelled.
///
/// Ticks start at a fixed rate from the first one. An endpoint that reported
/// synced once is not asked again.
pub struct SyncTracker<Q: SyncQuery> {
    query: Q,
    config: TrackerConfig,
    state: TrackerState,
    status: SyncStatus,
    progress: watch::Sender<SyncStatus>,
}

impl<Q: SyncQuery> SyncTracker<Q> {
    pub fn new(query: Q, config: TrackerConfig) -> Self {
        let (progress, _) = watch::channel(SyncStatus::default());
        Self {
            query,
            config,
            state: TrackerState::default(),
            status: SyncStatus::default(),
            progress,
        }
    }

    /// Get current tracker state.
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Receives the status after every tick.
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.progress.subscribe()
    }

    pub async fn run(mut self, cancel: CancellationToken) -> SyncReport {
        if self.config.poll_interval.is_zero() {
            warn!("Sync tracking needs a non-zero poll interval");
            return self.finish(TrackerState::Errored, 0);
        }

        let deadline = Instant::now() + self.config.deadline;
        let mut ticks = 0;

        loop {
            let tick_start = Instant::now();
            ticks += 1;

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                results = self.poll_once() => Some(results),
            };
            let Some((execution, consensus)) = outcome else {
                return self.finish(TrackerState::Cancelled, ticks);
            };

            let fatal = [
                self.record(Endpoint::Execution, execution),
                self.record(Endpoint::Consensus, consensus),
            ]
            .into_iter()
            .any(|fatal| fatal);
            self.progress.send_replace(self.status.clone());

            debug!(
                tick = ticks,
                execution_synced = self.status.execution_synced,
                consensus_synced = self.status.consensus_synced,
                last_error = ?self.status.last_error,
                "Sync tick finished"
            );

            if fatal {
                return self.finish(TrackerState::Errored, ticks);
            }
            if self.status.is_synced() {
                return self.finish(TrackerState::Synced, ticks);
            }

            let next_tick = tick_start + self.config.poll_interval;
            if next_tick >= deadline {
                return self.finish(TrackerState::TimedOut, ticks);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return self.finish(TrackerState::Cancelled, ticks),
                _ = time::sleep_until(next_tick) => {}
            }
        }
    }

    /// Queries every endpoint still behind, concurrently.
    async fn poll_once(&self) -> (QueryResult, QueryResult) {
        let execution = async {
            if self.status.is_endpoint_synced(Endpoint::Execution) {
                return None;
            }
            Some(self.bounded(Endpoint::Execution, self.query.query_execution_sync()).await)
        };
        let consensus = async {
            if self.status.is_endpoint_synced(Endpoint::Consensus) {
                return None;
            }
            Some(self.bounded(Endpoint::Consensus, self.query.query_consensus_sync()).await)
        };
        tokio::join!(execution, consensus)
    }

    async fn bounded<F>(&self, endpoint: Endpoint, query: F) -> Result<bool, QueryError>
    where
        F: std::future::Future<Output = Result<bool, QueryError>>,
    {
        let timeout = self.config.query_timeout;
        time::timeout(timeout, query)
            .await
            .unwrap_or(Err(QueryError::Timeout { endpoint, timeout }))
    }

    /// Applies one query result. Returns whether it was fatal.
    fn record(&mut self, endpoint: Endpoint, result: QueryResult) -> bool {
        match result {
            None | Some(Ok(false)) => false,
            Some(Ok(true)) => {
                self.status.mark_synced(endpoint);
                false
            }
            Some(Err(error)) => {
                let fatal = error.is_fatal();
                debug!(%endpoint, %error, fatal, "Sync query failed");
                self.status.last_error = Some(error);
                fatal
            }
        }
    }

    fn finish(mut self, state: TrackerState, ticks: u64) -> SyncReport {
        debug_assert!(self.state.can_transition_to(state));
        self.state = state;

        match state {
            TrackerState::TimedOut => warn!(
                ticks,
                execution_synced = self.status.execution_synced,
                consensus_synced = self.status.consensus_synced,
                "Sync deadline passed, check the clients manually"
            ),
            _ => info!(%state, ticks, "Sync tracking finished"),
        }

        SyncReport {
            state,
            status: self.status,
            ticks,
        }
    }
}

/// Tracks two HTTP endpoints. A malformed URL ends in [`TrackerState::Errored`]
/// without a single tick.
pub async fn track_endpoints(
    execution_url: &str,
    consensus_url: &str,
    config: TrackerConfig,
    cancel: CancellationToken,
) -> SyncReport {
    match HttpSyncQuery::new(execution_url, consensus_url) {
        Ok(query) => SyncTracker::new(query, config).run(cancel).await,
        Err(error) => {
            warn!(%error, "Cannot track sync");
            SyncReport {
                state: TrackerState::Errored,
                status: SyncStatus {
                    last_error: Some(error),
                    ..SyncStatus::default()
                },
                ticks: 0,
            }
        }
    }
}
