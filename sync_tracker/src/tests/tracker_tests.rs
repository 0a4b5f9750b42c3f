use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::{Endpoint, QueryError, SyncQuery, SyncTracker, TrackerConfig, TrackerState};
use pretty_assertions::assert_eq;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// One scripted answer per call; the last one repeats once the script runs out.
#[derive(Clone, Debug)]
enum Answer {
    Synced,
    Behind,
    Fail(QueryError),
    Hang,
}

struct Script {
    answers: Mutex<VecDeque<Answer>>,
    calls: AtomicUsize,
}

impl Script {
    fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self) -> Result<bool, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = {
            let mut answers = self.answers.lock().unwrap();
            if answers.len() > 1 {
                answers.pop_front().unwrap()
            } else {
                answers.front().cloned().unwrap_or(Answer::Behind)
            }
        };
        match answer {
            Answer::Synced => Ok(true),
            Answer::Behind => Ok(false),
            Answer::Fail(error) => Err(error),
            Answer::Hang => std::future::pending().await,
        }
    }
}

struct FakeQuery {
    execution: Script,
    consensus: Script,
}

impl FakeQuery {
    fn new(
        execution: impl IntoIterator<Item = Answer>,
        consensus: impl IntoIterator<Item = Answer>,
    ) -> Self {
        Self {
            execution: Script::new(execution),
            consensus: Script::new(consensus),
        }
    }
}

#[async_trait::async_trait]
impl SyncQuery for &'static FakeQuery {
    async fn query_execution_sync(&self) -> Result<bool, QueryError> {
        self.execution.answer().await
    }

    async fn query_consensus_sync(&self) -> Result<bool, QueryError> {
        self.consensus.answer().await
    }
}

fn leak(query: FakeQuery) -> &'static FakeQuery {
    Box::leak(Box::new(query))
}

fn config(interval: u64, deadline: u64) -> TrackerConfig {
    TrackerConfig::new(Duration::from_secs(interval), Duration::from_secs(deadline))
}

fn unreachable(endpoint: Endpoint) -> QueryError {
    QueryError::Unreachable {
        endpoint,
        reason: "connection refused".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_synced_on_first_tick() {
    let query = leak(FakeQuery::new([Answer::Synced], [Answer::Synced]));
    let report = SyncTracker::new(query, config(10, 300)).run(CancellationToken::new()).await;

    assert_eq!(report.state, TrackerState::Synced);
    assert_eq!(report.ticks, 1);
    assert!(report.status.is_synced());
    assert!(!report.is_fatal());
}

/// Execution never catches up and the deadline allows a single tick
#[tokio::test(start_paused = true)]
async fn test_times_out_after_one_tick() {
    let query = leak(FakeQuery::new([Answer::Behind], [Answer::Synced]));
    let report = SyncTracker::new(query, config(10, 10)).run(CancellationToken::new()).await;

    assert_eq!(report.state, TrackerState::TimedOut);
    assert_eq!(report.ticks, 1);
    assert!(!report.status.execution_synced);
    assert!(report.status.consensus_synced);
    assert!(!report.is_fatal());
}

#[tokio::test(start_paused = true)]
async fn test_tick_count_follows_deadline() {
    let query = leak(FakeQuery::new([Answer::Behind], [Answer::Behind]));
    let start = Instant::now();
    let report = SyncTracker::new(query, config(10, 25)).run(CancellationToken::new()).await;

    assert_eq!(report.state, TrackerState::TimedOut);
    assert_eq!(Some(report.ticks), config(10, 25).max_ticks());
    assert_eq!(query.execution.calls(), 3);
    assert!(start.elapsed() < Duration::from_secs(25));
}

/// A synced endpoint is never asked again
#[tokio::test(start_paused = true)]
async fn test_synced_endpoint_not_requeried() {
    let query = leak(FakeQuery::new(
        [Answer::Synced, Answer::Behind],
        [Answer::Behind, Answer::Behind, Answer::Synced],
    ));
    let report = SyncTracker::new(query, config(10, 300)).run(CancellationToken::new()).await;

    assert_eq!(report.state, TrackerState::Synced);
    assert_eq!(report.ticks, 3);
    assert_eq!(query.execution.calls(), 1);
    assert_eq!(query.consensus.calls(), 3);
}

/// Failed queries are recorded and polling goes on
#[tokio::test(start_paused = true)]
async fn test_query_errors_are_not_terminal() {
    let query = leak(FakeQuery::new(
        [Answer::Fail(unreachable(Endpoint::Execution)), Answer::Synced],
        [Answer::Synced],
    ));
    let report = SyncTracker::new(query, config(10, 300)).run(CancellationToken::new()).await;

    assert_eq!(report.state, TrackerState::Synced);
    assert_eq!(report.ticks, 2);
    assert_eq!(report.status.last_error, Some(unreachable(Endpoint::Execution)));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_endpoint_is_fatal() {
    let invalid = QueryError::InvalidEndpoint {
        endpoint: Endpoint::Consensus,
        url: "ftp://x".to_string(),
        reason: "unsupported scheme 'ftp'".to_string(),
    };
    let query = leak(FakeQuery::new([Answer::Behind], [Answer::Fail(invalid.clone())]));
    let report = SyncTracker::new(query, config(10, 300)).run(CancellationToken::new()).await;

    assert_eq!(report.state, TrackerState::Errored);
    assert_eq!(report.ticks, 1);
    assert_eq!(report.status.last_error, Some(invalid));
    assert!(report.is_fatal());
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_is_errored() {
    let query = leak(FakeQuery::new([Answer::Synced], [Answer::Synced]));
    let report = SyncTracker::new(query, config(0, 300)).run(CancellationToken::new()).await;

    assert_eq!(report.state, TrackerState::Errored);
    assert_eq!(report.ticks, 0);
    assert_eq!(query.execution.calls(), 0);
}

/// A hanging endpoint is cut off by the query timeout
#[tokio::test(start_paused = true)]
async fn test_hanging_query_times_out() {
    let query = leak(FakeQuery::new([Answer::Hang], [Answer::Synced]));
    let tracker_config = config(10, 30).with_query_timeout(Duration::from_secs(2));
    let report = SyncTracker::new(query, tracker_config).run(CancellationToken::new()).await;

    assert_eq!(report.state, TrackerState::TimedOut);
    assert_eq!(report.ticks, 3);
    assert_eq!(
        report.status.last_error,
        Some(QueryError::Timeout {
            endpoint: Endpoint::Execution,
            timeout: Duration::from_secs(2),
        })
    );
}

/// Cancelling does not wait for in-flight queries
#[tokio::test(start_paused = true)]
async fn test_cancel_during_query() {
    let query = leak(FakeQuery::new([Answer::Hang], [Answer::Hang]));
    let tracker_config = config(10, 300).with_query_timeout(Duration::from_secs(60));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let report = SyncTracker::new(query, tracker_config).run(cancel).await;

    assert_eq!(report.state, TrackerState::Cancelled);
    assert_eq!(report.ticks, 1);
    assert!(start.elapsed() < Duration::from_secs(60));
    assert!(!report.is_fatal());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_between_ticks() {
    let query = leak(FakeQuery::new([Answer::Behind], [Answer::Behind]));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(15)).await;
        trigger.cancel();
    });

    let report = SyncTracker::new(query, config(10, 300)).run(cancel).await;
    assert_eq!(report.state, TrackerState::Cancelled);
    assert_eq!(report.ticks, 2);
}

#[tokio::test(start_paused = true)]
async fn test_already_cancelled_runs_no_query() {
    let query = leak(FakeQuery::new([Answer::Synced], [Answer::Synced]));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = SyncTracker::new(query, config(10, 300)).run(cancel).await;
    assert_eq!(report.state, TrackerState::Cancelled);
    assert_eq!(query.execution.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_progress_published_each_tick() {
    let query = leak(FakeQuery::new(
        [Answer::Behind, Answer::Synced],
        [Answer::Synced],
    ));
    let tracker = SyncTracker::new(query, config(10, 300));
    let progress = tracker.subscribe();
    assert_eq!(tracker.state(), TrackerState::Polling);

    let report = tracker.run(CancellationToken::new()).await;
    assert_eq!(report.state, TrackerState::Synced);
    assert_eq!(*progress.borrow(), report.status);
}
