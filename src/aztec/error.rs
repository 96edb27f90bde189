// src/aztec/error.rs

use serde_json::Value;
use thiserror::Error;

/// Failure of a single JSON-RPC call against a node or PXE endpoint.
///
/// Every variant keeps the upstream text intact so whoever wraps it
/// (the MCP handler, a log line) can report it without loss.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout or a broken body stream.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP error: {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// The body was not JSON, or the `result` did not have the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    #[error("RPC error: {message} (code: {code})")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            ClientError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
