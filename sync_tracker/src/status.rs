use crate::query::{Endpoint, QueryError};

/// What the tracker knows about both clients so far.
///
/// The synced flags only ever go from `false` to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pub execution_synced: bool,
    pub consensus_synced: bool,
    pub last_error: Option<QueryError>,
}

impl SyncStatus {
    pub fn is_synced(&self) -> bool {
        self.execution_synced && self.consensus_synced
    }

    pub fn is_endpoint_synced(&self, endpoint: Endpoint) -> bool {
        match endpoint {
            Endpoint::Execution => self.execution_synced,
            Endpoint::Consensus => self.consensus_synced,
        }
    }

    pub(crate) fn mark_synced(&mut self, endpoint: Endpoint) {
        match endpoint {
            Endpoint::Execution => self.execution_synced = true,
            Endpoint::Consensus => self.consensus_synced = true,
        }
    }
}
