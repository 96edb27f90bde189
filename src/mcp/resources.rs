// src/mcp/resources.rs
//
// Read-only resources exposed through `resources/list` and `resources/read`.

use serde::Serialize;
use thiserror::Error;

use crate::aztec::AztecClient;

pub const NETWORK_STATUS_URI: &str = "aztec://network/status";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

/// Body of a resource read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Resource '{0}' not found: no resource is registered under this URI")]
    NotFound(String),

    #[error("failed to render resource: {0}")]
    Render(#[from] serde_json::Error),
}

static RESOURCES: [ResourceDescriptor; 7] = [
    ResourceDescriptor {
        uri: NETWORK_STATUS_URI,
        name: "Network Status",
        description: "Current Aztec network status, block height, and sync information",
        mime_type: "application/json",
    },
    ResourceDescriptor {
        uri: "aztec://docs/getting-started",
        name: "Getting Started Guide",
        description: "Complete guide to setting up and using Aztec for development",
        mime_type: "text/markdown",
    },
    ResourceDescriptor {
        uri: "aztec://docs/noir-contracts",
        name: "Noir Contract Development",
        description: "Comprehensive guide to writing Noir smart contracts for Aztec",
        mime_type: "text/markdown",
    },
    ResourceDescriptor {
        uri: "aztec://docs/privacy-patterns",
        name: "Privacy Patterns",
        description: "Best practices for building privacy-preserving applications on Aztec",
        mime_type: "text/markdown",
    },
    ResourceDescriptor {
        uri: "aztec://docs/accounts",
        name: "Account Abstraction",
        description: "Understanding Aztec's native account abstraction and account contracts",
        mime_type: "text/markdown",
    },
    ResourceDescriptor {
        uri: "aztec://docs/bridging",
        name: "L1-L2 Bridging",
        description: "Guide to bridging assets between Ethereum L1 and Aztec L2",
        mime_type: "text/markdown",
    },
    ResourceDescriptor {
        uri: "aztec://docs/cli-reference",
        name: "CLI Quick Reference",
        description: "Quick reference for aztec and aztec-wallet CLI commands",
        mime_type: "text/markdown",
    },
];

pub fn list_resources() -> &'static [ResourceDescriptor] {
    &RESOURCES
}

fn guide(uri: &str) -> Option<&'static str> {
    let text = match uri {
        "aztec://docs/getting-started" => include_str!("../../docs/getting-started.md"),
        "aztec://docs/noir-contracts" => include_str!("../../docs/noir-contracts.md"),
        "aztec://docs/privacy-patterns" => include_str!("../../docs/privacy-patterns.md"),
        "aztec://docs/accounts" => include_str!("../../docs/accounts.md"),
        "aztec://docs/bridging" => include_str!("../../docs/bridging.md"),
        "aztec://docs/cli-reference" => include_str!("../../docs/cli-reference.md"),
        _ => return None,
    };
    Some(text)
}

/// Reads a resource by exact URI. The network status resource runs a live
/// health check; guides are static.
pub async fn read_resource(client: &AztecClient, uri: &str) -> Result<ResourceContent, ResourceError> {
    if uri == NETWORK_STATUS_URI {
        let status = client.health_check().await;
        return Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "application/json",
            text: serde_json::to_string_pretty(&status)?,
        });
    }

    let text = guide(uri).ok_or_else(|| ResourceError::NotFound(uri.to_string()))?;
    Ok(ResourceContent {
        uri: uri.to_string(),
        mime_type: "text/markdown",
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_guide_is_embedded() {
        for descriptor in list_resources().iter().filter(|r| r.mime_type == "text/markdown") {
            let text = guide(descriptor.uri).unwrap_or_default();
            assert!(text.starts_with("# "), "{} is empty", descriptor.uri);
        }
        assert_eq!(list_resources().len(), 7);
    }

    #[tokio::test]
    async fn test_unknown_uri() {
        let client = AztecClient::default();
        let err = read_resource(&client, "aztec://docs/nope").await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(ref uri) if uri == "aztec://docs/nope"));
        assert!(err.to_string().starts_with("Resource 'aztec://docs/nope' not found"));
    }

    #[tokio::test]
    async fn test_read_guide() {
        let client = AztecClient::default();
        let content = read_resource(&client, "aztec://docs/cli-reference").await.unwrap();
        assert_eq!(content.mime_type, "text/markdown");
        assert!(content.text.contains("aztec-wallet send"));
    }

    #[tokio::test]
    async fn test_network_status_when_unreachable() {
        let client = AztecClient::new("http://127.0.0.1:1", None, "http://127.0.0.1:1");
        let content = read_resource(&client, NETWORK_STATUS_URI).await.unwrap();
        assert_eq!(content.mime_type, "application/json");
        assert_eq!(content.text, "{\n  \"node\": false,\n  \"pxe\": false\n}");
    }
}
