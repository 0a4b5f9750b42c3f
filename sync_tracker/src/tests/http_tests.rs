use crate::http::{parse_consensus_syncing, parse_execution_syncing};
use crate::{Endpoint, HttpSyncQuery, QueryError, SyncQuery};
use rstest::rstest;

#[rstest]
#[case(r#"{"jsonrpc":"2.0","id":1,"result":false}"#, true)]
#[case(r#"{"jsonrpc":"2.0","id":1,"result":{"startingBlock":"0x0","currentBlock":"0x10","highestBlock":"0x20"}}"#, false)]
#[case(r#"{"jsonrpc":"2.0","id":1,"result":true}"#, false)]
fn test_execution_syncing_response(#[case] body: &str, #[case] synced: bool) {
    assert_eq!(parse_execution_syncing(body), Ok(synced));
}

#[rstest]
#[case(r#"{"jsonrpc":"2.0","id":1}"#)]
#[case(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#)]
#[case(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#)]
#[case("<html>")]
fn test_execution_malformed(#[case] body: &str) {
    assert!(matches!(
        parse_execution_syncing(body),
        Err(QueryError::Malformed { endpoint: Endpoint::Execution, .. })
    ));
}

#[rstest]
#[case(r#"{"data":{"head_slot":"100","sync_distance":"0","is_syncing":false,"is_optimistic":false}}"#, true)]
#[case(r#"{"data":{"head_slot":"50","sync_distance":"50","is_syncing":true}}"#, false)]
fn test_consensus_syncing_response(#[case] body: &str, #[case] synced: bool) {
    assert_eq!(parse_consensus_syncing(body), Ok(synced));
}

#[test]
fn test_consensus_malformed() {
    let err = parse_consensus_syncing(r#"{"data":{}}"#).unwrap_err();
    assert_eq!(err.endpoint(), Endpoint::Consensus);
    assert!(!err.is_fatal());
}

#[rstest]
#[case("localhost:8545", "http://localhost:5052", Endpoint::Execution)]
#[case("http://localhost:8545", "ftp://localhost:5052", Endpoint::Consensus)]
#[case("http://localhost:8545", "not a url", Endpoint::Consensus)]
fn test_invalid_endpoints_are_fatal(
    #[case] execution: &str,
    #[case] consensus: &str,
    #[case] which: Endpoint,
) {
    let err = HttpSyncQuery::new(execution, consensus).unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.endpoint(), which);
}

#[test]
fn test_endpoint_urls_kept() {
    let query = HttpSyncQuery::new("http://127.0.0.1:8545", "http://127.0.0.1:5052/").unwrap();
    assert_eq!(query.execution_url().port(), Some(8545));
    assert_eq!(query.consensus_url().port(), Some(5052));
}

/// Nothing listens on port 1, so the query fails without ending tracking
#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    let query = HttpSyncQuery::new("http://127.0.0.1:1", "http://127.0.0.1:1").unwrap();
    let err = query.query_consensus_sync().await.unwrap_err();
    assert!(matches!(err, QueryError::Unreachable { endpoint: Endpoint::Consensus, .. }));
    assert!(!err.is_fatal());
}
