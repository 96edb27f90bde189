// src/aztec/mod.rs

pub mod client;
pub mod error;
pub mod models;
pub mod rpc;

pub use client::AztecClient;
pub use error::{ClientError, ClientResult};
pub use rpc::RpcTransport;
