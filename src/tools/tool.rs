//! The generative tool trait.

use serde_json::{Map, Value};

use super::arguments::ToolArguments;
use super::types::ToolParameters;
use super::validation::validate_arguments;
use crate::error::UiForgeError;

/// Argument shared by every tool: stream the provider output.
pub const STREAM_ARG: &str = "stream";
/// Argument shared by every tool: override the tool's max output tokens.
pub const MAX_TOKENS_ARG: &str = "maxTokens";

/// A tool that turns validated arguments into one prompt for the model.
///
/// Implementations only describe their inputs and render text; running the
/// generation is done by [`super::invoke::ToolInvoker`].
pub trait GenerativeTool: Send + Sync {
    /// Tool name (as listed to clients).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters, including `stream` and `maxTokens`.
    fn parameters(&self) -> &ToolParameters;

    /// Output token budget used when the caller does not pass `maxTokens`.
    fn max_output_tokens(&self) -> u32;

    /// Render the prompt. Must be pure.
    fn render(&self, args: &ToolArguments) -> Result<String, UiForgeError>;

    /// Size indicators for large inputs, merged into result metadata.
    fn input_metrics(&self, _args: &ToolArguments) -> Map<String, Value> {
        Map::new()
    }

    /// Check raw arguments against the schema and apply defaults.
    fn validate(&self, raw: &Value) -> Result<ToolArguments, UiForgeError> {
        validate_arguments(raw, &self.parameters().schema)
            .map(|normalized| ToolArguments::for_tool(self.name(), normalized))
            .map_err(|message| UiForgeError::validation(self.name(), message))
    }
}

impl std::fmt::Debug for dyn GenerativeTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeTool")
            .field("name", &self.name())
            .field("max_output_tokens", &self.max_output_tokens())
            .finish()
    }
}
