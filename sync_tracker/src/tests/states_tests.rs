use crate::{TrackerConfig, TrackerState};
use rstest::rstest;
use std::time::Duration;

#[test]
fn test_initial_state_is_polling() {
    assert_eq!(TrackerState::default(), TrackerState::Polling);
    assert!(!TrackerState::Polling.is_terminal());
}

#[rstest]
#[case(TrackerState::Synced)]
#[case(TrackerState::TimedOut)]
#[case(TrackerState::Errored)]
#[case(TrackerState::Cancelled)]
fn test_terminal_states_do_not_move(#[case] state: TrackerState) {
    assert!(TrackerState::Polling.can_transition_to(state));
    assert!(state.is_terminal());
    assert!(!state.can_transition_to(TrackerState::Polling));
}

#[test]
fn test_only_errored_is_fatal() {
    assert!(TrackerState::Errored.is_fatal());
    assert!(!TrackerState::TimedOut.is_fatal());
    assert!(!TrackerState::Cancelled.is_fatal());
}

#[rstest]
#[case(10, 0, Some(1))]
#[case(10, 10, Some(1))]
#[case(10, 25, Some(3))]
#[case(10, 30, Some(3))]
#[case(5, 30, Some(6))]
#[case(0, 30, None)]
fn test_max_ticks(#[case] interval: u64, #[case] deadline: u64, #[case] expected: Option<u64>) {
    let config = TrackerConfig::new(Duration::from_secs(interval), Duration::from_secs(deadline));
    assert_eq!(config.max_ticks(), expected);
}

#[test]
fn test_default_config() {
    let config = TrackerConfig::default();
    assert_eq!(config.poll_interval, Duration::from_secs(10));
    assert_eq!(config.deadline, Duration::from_secs(300));
    assert_eq!(config.query_timeout, Duration::from_secs(5));
}
