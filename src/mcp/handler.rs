//! # MCP Handler Module
//!
//! Implements the Model Context Protocol surface of the Aztec server: the
//! JSON-RPC methods an MCP host calls, routed onto the tool dispatcher and
//! the resource table.
//!
//! ## Supported Methods
//!
//! - `initialize` / `ping`
//! - `tools/list` - the 47 tool descriptors
//! - `tools/call` - run one tool, result rendered as text content
//! - `resources/list` / `resources/read` - network status and guides
//!
//! Any registered tool name (e.g. `aztec_get_block_number`) is also accepted
//! as a method and treated as a `tools/call` with the params as arguments.

use serde_json::{json, Map, Value};
use tracing::{error, info, warn};

use crate::{
    mcp::{
        format::format_tool_result,
        protocol::{error_codes, Request, Response, MCP_PROTOCOL_VERSION},
        resources::{self, ResourceError},
    },
    tools::{self, dispatch, DispatchError},
    AppState,
};

const SERVER_NAME: &str = "aztec-mcp-server";

// Wraps tool output in the MCP `content` array.
fn make_text_result(text: String) -> Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => Response::success(req.id, json!({})),
        "tools/list" => handle_tools_list(&req),
        "tools/call" => handle_tool_call(req, &state).await,
        "resources/list" => handle_resources_list(&req),
        "resources/read" => handle_resources_read(req, &state).await,
        method if dispatch::is_registered(method) => {
            handle_tool_call(req.into_tool_call(), &state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request by dispatching it to the named tool.
async fn handle_tool_call(req: Request, state: &AppState) -> Response {
    let params = match req.params.as_ref() {
        Some(p) => p,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'params' object".into(),
            )
        }
    };

    let tool_name = match params.get("name").and_then(|n| n.as_str()) {
        Some(name) => name,
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'name' field in params".into(),
            )
        }
    };

    let args = match params.get("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "'arguments' must be an object".into(),
            )
        }
    };

    info!(tool = tool_name, "Calling tool");

    match tools::handle_tool_call(&state.client, tool_name, &args).await {
        Ok(result) => Response::success(req.id, make_text_result(format_tool_result(&result))),
        Err(err @ DispatchError::UnknownOperation { .. }) => {
            warn!("{}", err);
            Response::error(req.id, error_codes::INVALID_PARAMS, err.to_string())
        }
        Err(err) => {
            error!(tool = tool_name, "Tool failed: {}", err);
            Response::error_with_data(
                req.id,
                error_codes::INTERNAL_ERROR,
                format!("Tool '{}' failed: {}", tool_name, err),
                json!({
                    "tool": tool_name,
                    "arguments": Value::Object(args),
                    "error": err.to_string(),
                }),
            )
        }
    }
}

/// Handles the 'initialize' request.
fn handle_initialize(req: &Request) -> Response {
    let server_info = json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({
        "tools": { "listChanged": false },
        "resources": { "listChanged": false }
    });
    let instructions = "Aztec MCP server: query an Aztec node and PXE, and get ready-to-run \
        aztec / aztec-wallet CLI commands for accounts, contracts, transactions, bridging, \
        validators, governance and key generation.";

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

fn handle_tools_list(req: &Request) -> Response {
    Response::success(req.id.clone(), json!({ "tools": tools::tools() }))
}

fn handle_resources_list(req: &Request) -> Response {
    Response::success(
        req.id.clone(),
        json!({ "resources": resources::list_resources() }),
    )
}

async fn handle_resources_read(req: Request, state: &AppState) -> Response {
    let uri = match req
        .params
        .as_ref()
        .and_then(|p| p.get("uri"))
        .and_then(Value::as_str)
    {
        Some(uri) => uri.to_string(),
        None => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                "Missing 'uri' field in params".into(),
            )
        }
    };

    match resources::read_resource(&state.client, &uri).await {
        Ok(content) => Response::success(req.id, json!({ "contents": [content] })),
        Err(err @ ResourceError::NotFound(_)) => {
            warn!("{}", err);
            Response::error(req.id, error_codes::INVALID_REQUEST, err.to_string())
        }
        Err(err) => {
            error!(%uri, "Resource read failed: {}", err);
            Response::error(req.id, error_codes::INTERNAL_ERROR, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aztec::AztecClient, config::Config};

    fn offline_state() -> AppState {
        AppState::new(
            Config::default(),
            AztecClient::new("http://127.0.0.1:1", None, "http://127.0.0.1:1"),
        )
    }

    fn request(method: &str, params: Value) -> Request {
        Request {
            jsonrpc: "2.0".into(),
            id: json!(1),
            method: method.into(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let req = Request {
            jsonrpc: "2.0".into(),
            id: Value::Null,
            method: "notifications/initialized".into(),
            params: None,
        };
        assert!(handle_mcp_request(req, offline_state()).await.is_none());
    }

    #[tokio::test]
    async fn test_initialize_advertises_tools_and_resources() {
        let resp = handle_mcp_request(request("initialize", json!({})), offline_state())
            .await
            .unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
    }

    #[tokio::test]
    async fn test_instruction_tool_call_returns_text() {
        let resp = handle_mcp_request(
            request(
                "tools/call",
                json!({"name": "aztec_create_account", "arguments": {"type": "schnorr", "alias": "w"}}),
            ),
            offline_state(),
        )
        .await
        .unwrap();
        let text = resp.result.unwrap()["content"][0]["text"].as_str().unwrap().to_string();
        let payload: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(payload["command"], "aztec-wallet create-account -t schnorr -a w");
    }

    #[tokio::test]
    async fn test_direct_tool_method_is_rewritten() {
        let resp = handle_mcp_request(request("aztec_advance_epoch", json!({})), offline_state())
            .await
            .unwrap();
        let text = resp.result.unwrap()["content"][0]["text"].as_str().unwrap().to_string();
        assert!(text.contains("aztec advance-epoch"));
    }

    #[tokio::test]
    async fn test_error_codes() {
        let state = offline_state();

        let unknown_tool = handle_mcp_request(
            request("tools/call", json!({"name": "aztec_nope"})),
            state.clone(),
        )
        .await
        .unwrap();
        assert_eq!(unknown_tool.error_code(), Some(error_codes::INVALID_PARAMS));
        assert_eq!(unknown_tool.error.unwrap().message, "Unknown tool: aztec_nope");

        let failed = handle_mcp_request(
            request("tools/call", json!({"name": "aztec_get_block_number", "arguments": {}})),
            state.clone(),
        )
        .await
        .unwrap();
        let err = failed.error.unwrap();
        assert_eq!(err.code, error_codes::INTERNAL_ERROR);
        assert!(err.message.starts_with("Tool 'aztec_get_block_number' failed: "));
        let data = err.data.unwrap();
        assert_eq!(data["tool"], "aztec_get_block_number");
        assert_eq!(data["arguments"], json!({}));

        let missing_arg = handle_mcp_request(
            request("tools/call", json!({"name": "aztec_deploy_account", "arguments": {}})),
            state.clone(),
        )
        .await
        .unwrap();
        assert_eq!(missing_arg.error_code(), Some(error_codes::INTERNAL_ERROR));

        let unknown_resource = handle_mcp_request(
            request("resources/read", json!({"uri": "aztec://nowhere"})),
            state.clone(),
        )
        .await
        .unwrap();
        assert_eq!(unknown_resource.error_code(), Some(error_codes::INVALID_REQUEST));
        assert!(unknown_resource
            .error
            .unwrap()
            .message
            .starts_with("Resource 'aztec://nowhere' not found"));

        let unknown_method = handle_mcp_request(request("foo/bar", json!({})), state)
            .await
            .unwrap();
        assert_eq!(unknown_method.error_code(), Some(error_codes::METHOD_NOT_FOUND));
    }
}
