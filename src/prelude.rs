//! Convenience re-exports for common use.

pub use crate::error::{ErrorKind, Result, UiForgeError};
pub use crate::generation::{Checkpoint, GenerationBridge};
pub use crate::provider::anthropic::AnthropicProvider;
pub use crate::provider::TextProvider;
pub use crate::server::UiForgeServer;
pub use crate::session::{SessionMetrics, SessionTracker};
pub use crate::tools::{GenerativeTool, ToolArguments, ToolParameters};
pub use crate::types::{
    FinishReason, GenerationRequest, GenerationResult, ToolInvocationResult, Usage,
};
