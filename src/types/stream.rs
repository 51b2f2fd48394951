//! Streaming types.

use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use super::generation::FinishReason;
use super::usage::Usage;
use crate::error::UiForgeError;

/// Lazy, finite, non-restartable sequence of provider events.
pub type DeltaStream = BoxStream<'static, Result<TextStreamDelta, UiForgeError>>;

/// A delta emitted during streaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStreamDelta {
    /// The incremental text chunk.
    pub text: String,
    /// Event type.
    pub event_type: StreamEventType,
    /// Finish reason (only on the final delta).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Usage (typically on the start and final deltas).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl TextStreamDelta {
    /// A text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            event_type: StreamEventType::TextDelta,
            finish_reason: None,
            usage: None,
        }
    }

    /// A usage-only event that carries no text.
    pub fn usage(usage: Usage) -> Self {
        Self {
            text: String::new(),
            event_type: StreamEventType::Start,
            finish_reason: None,
            usage: Some(usage),
        }
    }

    /// The terminal event.
    pub fn done(finish_reason: Option<FinishReason>, usage: Option<Usage>) -> Self {
        Self {
            text: String::new(),
            event_type: StreamEventType::Done,
            finish_reason,
            usage,
        }
    }

    /// Whether this delta carries model output text.
    pub fn is_fragment(&self) -> bool {
        self.event_type == StreamEventType::TextDelta && !self.text.is_empty()
    }
}

/// Type of stream event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreamEventType {
    /// Incremental text content.
    TextDelta,
    /// Stream started.
    Start,
    /// Stream finished.
    Done,
}
