//! Transports exposing the dispatcher: MCP over stdio and a small HTTP façade.

pub mod http;
pub mod mcp;

pub use mcp::{serve_stdio, McpHandler};
