//! Generation request and result types.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::usage::Usage;
use crate::error::UiForgeError;

/// Sampling temperature shared by every tool.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// A single prompt to send to the provider.
///
/// Built fresh for every tool invocation and never mutated afterwards.
#[derive(Debug, Clone, Builder, PartialEq)]
pub struct GenerationRequest {
    #[builder(into)]
    prompt_text: String,
    max_output_tokens: u32,
    #[builder(default = DEFAULT_TEMPERATURE)]
    temperature: f64,
    #[builder(default = true)]
    use_streaming: bool,
}

impl GenerationRequest {
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn use_streaming(&self) -> bool {
        self.use_streaming
    }

    /// Reject requests the provider would refuse anyway.
    pub fn validate(&self) -> Result<(), UiForgeError> {
        if self.max_output_tokens == 0 {
            return Err(UiForgeError::validation(
                "generation",
                "max output tokens must be at least 1",
            ));
        }
        if self.prompt_text.trim().is_empty() {
            return Err(UiForgeError::validation("generation", "prompt is empty"));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(UiForgeError::validation(
                "generation",
                format!("temperature {} is outside 0.0..=1.0", self.temperature),
            ));
        }
        Ok(())
    }
}

/// Fully assembled provider output.
///
/// `fragment_count` is zero exactly when `was_streamed` is false.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub text: String,
    pub usage: Usage,
    pub was_streamed: bool,
    pub fragment_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error,
}

impl FinishReason {
    /// Map an Anthropic `stop_reason`.
    pub fn from_anthropic(stop_reason: &str) -> Option<Self> {
        match stop_reason {
            "end_turn" | "stop_sequence" => Some(Self::Stop),
            "max_tokens" => Some(Self::Length),
            "refusal" => Some(Self::ContentFilter),
            _ => None,
        }
    }
}
