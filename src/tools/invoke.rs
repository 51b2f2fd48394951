//! Running a tool: validation, rendering, generation, and the result envelope.

use std::time::Instant;

use serde_json::{json, Map, Value};
use strum::Display;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::arguments::ToolArguments;
use super::tool::{GenerativeTool, MAX_TOKENS_ARG, STREAM_ARG};
use crate::error::UiForgeError;
use crate::generation::GenerationBridge;
use crate::session::SessionTracker;
use crate::types::{GenerationRequest, ToolInvocationResult};

/// Lifecycle of one invocation. Rejected, Succeeded and Failed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum InvocationState {
    Received,
    Validating,
    Rejected,
    Validated,
    Rendering,
    Requesting,
    Succeeded,
    Failed,
}

/// Executes [`GenerativeTool`]s against a shared bridge and session registry.
#[derive(Debug, Clone)]
pub struct ToolInvoker {
    bridge: GenerationBridge,
    sessions: SessionTracker,
}

impl ToolInvoker {
    pub fn new(bridge: GenerationBridge, sessions: SessionTracker) -> Self {
        Self { bridge, sessions }
    }

    pub fn bridge(&self) -> &GenerationBridge {
        &self.bridge
    }

    pub fn sessions(&self) -> &SessionTracker {
        &self.sessions
    }

    /// Validate raw arguments, then [`handle`](Self::handle) them.
    ///
    /// Never fails: every error is folded into an `is_error` envelope.
    pub async fn invoke(
        &self,
        tool: &dyn GenerativeTool,
        raw: &Value,
        session_id: &str,
        cancel: &CancellationToken,
    ) -> ToolInvocationResult {
        transition(tool, InvocationState::Received);
        transition(tool, InvocationState::Validating);
        match tool.validate(raw) {
            Ok(args) => {
                transition(tool, InvocationState::Validated);
                self.handle(tool, &args, session_id, cancel).await
            }
            Err(err) => {
                transition(tool, InvocationState::Rejected);
                warn!(tool = tool.name(), error = %err, "tool arguments rejected");
                ToolInvocationResult::failure(tool.name(), &err)
            }
        }
    }

    /// Run a tool with already validated arguments.
    ///
    /// Cancellation is observed only on entry; once the provider call has
    /// started it runs to completion or failure.
    pub async fn handle(
        &self,
        tool: &dyn GenerativeTool,
        args: &ToolArguments,
        session_id: &str,
        cancel: &CancellationToken,
    ) -> ToolInvocationResult {
        match self.execute(tool, args, session_id, cancel).await {
            Ok(result) => {
                transition(tool, InvocationState::Succeeded);
                result
            }
            Err(err) => {
                transition(tool, InvocationState::Failed);
                warn!(tool = tool.name(), kind = %err.kind(), error = %err, "tool invocation failed");
                ToolInvocationResult::failure(tool.name(), &err)
            }
        }
    }

    async fn execute(
        &self,
        tool: &dyn GenerativeTool,
        args: &ToolArguments,
        session_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ToolInvocationResult, UiForgeError> {
        if cancel.is_cancelled() {
            return Err(UiForgeError::Cancelled(tool.name().to_string()));
        }
        let max_output_tokens = args
            .get_u32_opt(MAX_TOKENS_ARG)?
            .unwrap_or_else(|| tool.max_output_tokens());
        self.sessions.track_tool(session_id, tool.name());

        transition(tool, InvocationState::Rendering);
        let prompt = tool.render(args)?;
        let request = GenerationRequest::builder()
            .prompt_text(prompt)
            .max_output_tokens(max_output_tokens)
            .use_streaming(args.get_bool_or(STREAM_ARG, true))
            .build();

        transition(tool, InvocationState::Requesting);
        let started = Instant::now();
        let generation = self.bridge.generate(&request).await?;
        let generation_time_ms = started.elapsed().as_millis() as u64;

        let mut metadata = Map::new();
        metadata.insert("toolName".into(), json!(tool.name()));
        metadata.insert("sessionId".into(), json!(session_id));
        metadata.extend(tool.input_metrics(args));
        metadata.insert("streamed".into(), json!(generation.was_streamed));
        metadata.insert("chunkCount".into(), json!(generation.fragment_count));
        metadata.insert("maxTokens".into(), json!(max_output_tokens));
        if let Some(reason) = generation.finish_reason {
            metadata.insert("finishReason".into(), json!(reason.to_string()));
        }
        metadata.insert(
            "performanceMetrics".into(),
            self.performance_metrics(session_id, generation_time_ms),
        );
        metadata.insert("usageStatistics".into(), serde_json::to_value(&generation.usage)?);

        info!(
            tool = tool.name(),
            session_id,
            streamed = generation.was_streamed,
            chunks = generation.fragment_count,
            generation_time_ms,
            "tool invocation succeeded"
        );
        Ok(ToolInvocationResult::success(generation.text, metadata))
    }

    fn performance_metrics(&self, session_id: &str, generation_time_ms: u64) -> Value {
        let mut metrics = self
            .sessions
            .get_metrics(session_id)
            .and_then(|m| serde_json::to_value(m).ok())
            .and_then(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();
        metrics.insert("generationTimeMs".into(), json!(generation_time_ms));
        Value::Object(metrics)
    }
}

fn transition(tool: &dyn GenerativeTool, state: InvocationState) {
    debug!(tool = tool.name(), %state, "invocation state");
}
