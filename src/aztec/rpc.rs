// src/aztec/rpc.rs
//
// JSON-RPC 2.0 over HTTP POST. One call, one request, no retries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::{ClientError, ClientResult};

pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing request envelope.
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: &'a [Value],
    pub id: u64,
}

/// Incoming response envelope. The `id` is parsed but never matched against
/// the request since only one call is in flight per invocation.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// HTTP transport shared by every facade method of one client.
///
/// Clones share the request-id counter; two transports built with `new`
/// never do.
#[derive(Clone, Debug)]
pub struct RpcTransport {
    http: Client,
    last_id: Arc<AtomicU64>,
}

impl Default for RpcTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(http: Client) -> Self {
        Self {
            http,
            last_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Id of the most recently issued request, 0 before the first call.
    pub fn last_request_id(&self) -> u64 {
        self.last_id.load(Ordering::SeqCst)
    }

    fn allocate_id(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    /// Performs the call and returns the raw `result`, `Value::Null` when the
    /// server omitted it.
    pub async fn request(&self, url: &str, method: &str, params: Vec<Value>) -> ClientResult<Value> {
        let id = self.allocate_id();
        let envelope = RequestEnvelope {
            jsonrpc: JSONRPC_VERSION,
            method,
            params: &params,
            id,
        };
        debug!(method, id, url, "sending JSON-RPC request");

        let response = self
            .http
            .post(url)
            .json(&envelope)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(ClientError::Transport)?;
        let envelope: ResponseEnvelope = serde_json::from_slice(&body)?;

        if let Some(err) = envelope.error {
            return Err(ClientError::Rpc {
                code: err.code,
                message: err.message,
                data: err.data,
            });
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// Same as [`request`](Self::request) but decodes the result into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        url: &str,
        method: &str,
        params: Vec<Value>,
    ) -> ClientResult<T> {
        let result = self.request(url, method, params).await?;
        Ok(serde_json::from_value(result)?)
    }
}
