use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Execution,
    Consensus,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Execution => f.write_str("execution"),
            Endpoint::Consensus => f.write_str("consensus"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("{endpoint} endpoint unreachable: {reason}")]
    Unreachable { endpoint: Endpoint, reason: String },

    #[error("{endpoint} endpoint answered with HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("{endpoint} endpoint sent a malformed response: {reason}")]
    Malformed { endpoint: Endpoint, reason: String },

    #[error("{endpoint} endpoint did not answer within {timeout:?}")]
    Timeout { endpoint: Endpoint, timeout: Duration },

    #[error("invalid {endpoint} endpoint '{url}': {reason}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        url: String,
        reason: String,
    },
}

impl QueryError {
    /// Fatal errors cannot go away by polling again.
    pub fn is_fatal(&self) -> bool {
        matches!(self, QueryError::InvalidEndpoint { .. })
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            QueryError::Unreachable { endpoint, .. }
            | QueryError::Status { endpoint, .. }
            | QueryError::Malformed { endpoint, .. }
            | QueryError::Timeout { endpoint, .. }
            | QueryError::InvalidEndpoint { endpoint, .. } => *endpoint,
        }
    }
}

/// Asks each client whether it has caught up with its network.
///
/// `Ok(true)` means synced. Implementations should not retry internally;
/// the tracker decides when to ask again.
#[async_trait]
pub trait SyncQuery: Send + Sync {
    async fn query_execution_sync(&self) -> Result<bool, QueryError>;

    async fn query_consensus_sync(&self) -> Result<bool, QueryError>;
}
