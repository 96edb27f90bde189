//! # API Module
//!
//! HTTP front end for the Aztec MCP server, used when it runs in HTTP mode.
//!
//! ## Available Endpoints
//!
//! - `GET /api/health` - node and PXE health with an overall status
//! - `POST /api/rpc` - one MCP JSON-RPC request per call

pub mod health;
pub mod rpc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

/// Builds the full application router with every route nested under `/api`.
pub fn router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health::health_handler))
        // JSON-RPC endpoint for MCP tool calls
        .route("/rpc", post(rpc::rpc_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
