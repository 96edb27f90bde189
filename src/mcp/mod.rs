// MCP surface: JSON-RPC envelope, request routing, result text and resources.
pub mod format;
pub mod handler;
pub mod protocol;
pub mod resources;
