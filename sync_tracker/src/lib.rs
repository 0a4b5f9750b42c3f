//! Post-deployment sync tracking.
//!
//! Polls an execution client and a consensus client until both report that
//! they have caught up with their network.
//!
//! ## State Machine
//!
//! - **POLLING**: at least one client is still behind
//! - **SYNCED**: both clients reported synced
//! - **TIMED-OUT**: the deadline passed first; a warning, not a failure
//! - **ERRORED**: endpoint configuration is unusable
//! - **CANCELLED**: stopped from outside
pub mod config;
pub mod http;
pub mod query;
pub mod states;
pub mod status;
pub mod tracker;

pub use config::*;
pub use http::HttpSyncQuery;
pub use query::{Endpoint, QueryError, SyncQuery};
pub use states::TrackerState;
pub use status::SyncStatus;
pub use tracker::{track_endpoints, SyncReport, SyncTracker};

#[cfg(test)]
mod tests;
