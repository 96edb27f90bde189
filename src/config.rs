// src/config.rs

use std::env;

use anyhow::{Context, Result};
use tracing::warn;
use url::Url;

use crate::aztec::client::{DEFAULT_L1_RPC_URL, DEFAULT_NODE_URL, DEFAULT_PXE_URL};

pub const DEFAULT_PORT: u16 = 8080;

// A struct to hold all configuration, loaded once at startup from the environment / .env file.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    // Server settings
    pub port: u16,
    /// Serve MCP over HTTP instead of stdin/stdout.
    pub http_mode: bool,

    // Aztec endpoints
    pub pxe_url: String,
    pub node_url: String,
    /// Reserved for L1 operations; no tool calls it yet.
    pub l1_rpc_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            http_mode: false,
            pxe_url: DEFAULT_PXE_URL.to_string(),
            node_url: DEFAULT_NODE_URL.to_string(),
            l1_rpc_url: DEFAULT_L1_RPC_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let pxe_url = get("AZTEC_PXE_URL")
            .or_else(|| get("PXE_URL"))
            .unwrap_or_else(|| DEFAULT_PXE_URL.to_string());
        let node_url = get("AZTEC_NODE_URL").unwrap_or_else(|| DEFAULT_NODE_URL.to_string());
        let l1_rpc_url = get("ETHEREUM_HOST")
            .or_else(|| get("L1_RPC_URL"))
            .unwrap_or_else(|| DEFAULT_L1_RPC_URL.to_string());

        let port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?,
            None => DEFAULT_PORT,
        };

        let config = Config {
            port,
            http_mode: get("MCP_HTTP").is_some(),
            pxe_url,
            node_url,
            l1_rpc_url,
        };
        config.warn_on_malformed_urls();
        Ok(config)
    }

    /// URLs are used verbatim; a malformed one only surfaces as a warning here
    /// and as a transport error on first use.
    fn warn_on_malformed_urls(&self) {
        let urls = [
            ("pxe", self.pxe_url.as_str()),
            ("node", self.node_url.as_str()),
            ("l1", self.l1_rpc_url.as_str()),
        ];
        for (role, raw) in urls {
            if let Err(e) = Url::parse(raw) {
                warn!(role, url = raw, "endpoint URL does not parse: {}", e);
            }
        }
    }
}
