//! Sync tracker state machine.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackerState {
    /// Polling state: at least one endpoint has not reported synced yet.
    ///
    /// Initial state. Query failures are recorded and polling goes on until
    /// the deadline passes.
    #[default]
    Polling,

    /// Synced state: both endpoints reported synced, in this tick or earlier.
    Synced,

    /// Timed-out state: the deadline passed with an endpoint still behind.
    ///
    /// Terminal but not fatal. The deployment keeps running and the operator
    /// checks on it by hand.
    TimedOut,

    /// Errored state: the configuration cannot work, e.g. a malformed endpoint.
    Errored,

    /// Cancelled state: an external stop signal ended tracking.
    Cancelled,
}

impl TrackerState {
    /// Check if a transition to the target state is valid.
    ///
    /// Every state other than polling is terminal.
    pub fn can_transition_to(&self, target: TrackerState) -> bool {
        match self {
            TrackerState::Polling => matches!(
                target,
                TrackerState::Polling
                    | TrackerState::Synced
                    | TrackerState::TimedOut
                    | TrackerState::Errored
                    | TrackerState::Cancelled
            ),
            TrackerState::Synced
            | TrackerState::TimedOut
            | TrackerState::Errored
            | TrackerState::Cancelled => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TrackerState::Polling)
    }

    /// Only a broken configuration is fatal; a time-out is a warning.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TrackerState::Errored)
    }
}

impl fmt::Display for TrackerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrackerState::Polling => "polling",
            TrackerState::Synced => "synced",
            TrackerState::TimedOut => "timed-out",
            TrackerState::Errored => "errored",
            TrackerState::Cancelled => "cancelled",
        })
    }
}
