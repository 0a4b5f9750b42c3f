use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::query::{Endpoint, QueryError, SyncQuery};

const CONSENSUS_SYNCING_PATH: &str = "eth/v1/node/syncing";

/// Queries real clients: JSON-RPC `eth_syncing` on the execution side and
/// the beacon node syncing endpoint on the consensus side.
#[derive(Clone, Debug)]
pub struct HttpSyncQuery {
    client: Client,
    execution: Url,
    consensus: Url,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Deserialize)]
struct BeaconSyncingResponse {
    data: BeaconSyncingData,
}

#[derive(Deserialize)]
struct BeaconSyncingData {
    is_syncing: bool,
}

impl HttpSyncQuery {
    pub fn new(execution_url: &str, consensus_url: &str) -> Result<Self, QueryError> {
        Ok(Self {
            client: Client::new(),
            execution: parse_endpoint(Endpoint::Execution, execution_url)?,
            consensus: parse_endpoint(Endpoint::Consensus, consensus_url)?,
        })
    }

    pub fn execution_url(&self) -> &Url {
        &self.execution
    }

    pub fn consensus_url(&self) -> &Url {
        &self.consensus
    }

    fn consensus_syncing_url(&self) -> String {
        format!(
            "{}/{CONSENSUS_SYNCING_PATH}",
            self.consensus.as_str().trim_end_matches('/')
        )
    }

    async fn fetch(
        &self,
        endpoint: Endpoint,
        request: reqwest::RequestBuilder,
    ) -> Result<String, QueryError> {
        let response = request.send().await.map_err(|e| QueryError::Unreachable {
            endpoint,
            reason: e.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|e| QueryError::Unreachable {
            endpoint,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SyncQuery for HttpSyncQuery {
    async fn query_execution_sync(&self) -> Result<bool, QueryError> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": "eth_syncing",
            "params": [],
            "id": 1,
        });
        let request = self.client.post(self.execution.clone()).json(&body);
        let text = self.fetch(Endpoint::Execution, request).await?;
        parse_execution_syncing(&text)
    }

    async fn query_consensus_sync(&self) -> Result<bool, QueryError> {
        let request = self.client.get(self.consensus_syncing_url());
        let text = self.fetch(Endpoint::Consensus, request).await?;
        parse_consensus_syncing(&text)
    }
}

/// `eth_syncing` answers `false` once synced and a progress object before that.
pub fn parse_execution_syncing(text: &str) -> Result<bool, QueryError> {
    let malformed = |reason: String| QueryError::Malformed {
        endpoint: Endpoint::Execution,
        reason,
    };
    let response: JsonRpcResponse =
        serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
    if let Some(error) = response.error {
        return Err(malformed(format!("rpc error {error}")));
    }
    match response.result {
        Some(Value::Bool(false)) => Ok(true),
        Some(Value::Bool(true)) | Some(Value::Object(_)) => Ok(false),
        Some(other) => Err(malformed(format!("unexpected result {other}"))),
        None => Err(malformed("missing result".to_string())),
    }
}

pub fn parse_consensus_syncing(text: &str) -> Result<bool, QueryError> {
    serde_json::from_str::<BeaconSyncingResponse>(text)
        .map(|response| !response.data.is_syncing)
        .map_err(|e| QueryError::Malformed {
            endpoint: Endpoint::Consensus,
            reason: e.to_string(),
        })
}

fn parse_endpoint(endpoint: Endpoint, raw: &str) -> Result<Url, QueryError> {
    let invalid = |reason: String| QueryError::InvalidEndpoint {
        endpoint,
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        "http" | "https" => Err(invalid("missing host".to_string())),
        scheme => Err(invalid(format!("unsupported scheme '{scheme}'"))),
    }
}
