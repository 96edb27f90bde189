// src/tools/mod.rs

pub mod catalog;
pub mod commands;
pub mod dispatch;

use thiserror::Error;

use crate::aztec::ClientError;

pub use catalog::{find_tool, tool_categories, tool_count, tools, ToolCategory, ToolDescriptor};
pub use dispatch::{handle_tool_call, registered_tools, ToolHandler};

/// Failure of a single tool invocation.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unknown tool: {name}")]
    UnknownOperation { name: String },

    #[error("Missing or invalid required argument: '{0}'")]
    InvalidArgument(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn is_unknown_operation(&self) -> bool {
        matches!(self, DispatchError::UnknownOperation { .. })
    }
}
