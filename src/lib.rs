#![recursion_limit = "256"]
// src/lib.rs

// Re-export commonly used types
pub use aztec::{AztecClient, ClientError, ClientResult};
pub use tools::DispatchError;

// Re-export modules
pub mod api;
pub mod aztec;
pub mod config;
pub mod mcp;
pub mod tools;
pub mod utils;

/// Application state shared across all request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Application configuration
    pub config: config::Config,
    /// Client for the Aztec node and PXE endpoints
    pub client: AztecClient,
}

impl AppState {
    pub fn new(config: config::Config, client: AztecClient) -> Self {
        Self { config, client }
    }

    /// Builds the client from the configured endpoint URLs.
    pub fn from_config(config: config::Config) -> Self {
        let client = AztecClient::new(
            config.pxe_url.clone(),
            Some(config.node_url.clone()),
            config.l1_rpc_url.clone(),
        );
        Self { config, client }
    }
}
