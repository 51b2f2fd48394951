//! uiforge: an MCP server for AI-backed UI code generation.
//!
//! Tools validate their arguments, render a single prompt, and hand it to a
//! [`generation::GenerationBridge`], which returns the same buffered
//! [`types::GenerationResult`] whether the provider streamed or not. Results
//! are wrapped in a [`types::ToolInvocationResult`] enriched with per-session
//! metrics from [`session::SessionTracker`].
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use uiforge::prelude::*;
//!
//! # async fn example() -> uiforge::error::Result<()> {
//! let provider = AnthropicProvider::new("claude-sonnet-4-5", "sk-...", None)?;
//! let bridge = GenerationBridge::new(Arc::new(provider));
//! let server = UiForgeServer::with_builtin_tools(bridge, SessionTracker::new())?;
//! uiforge::transport::serve_stdio(server).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod prelude;
pub mod provider;
pub mod server;
pub mod session;
pub mod tools;
pub mod transport;
pub mod types;
