//! The generation bridge: one call shape for buffered and streamed output.

use std::sync::Arc;

use tracing::{debug, info};

use super::stream::{collect_stream, Checkpoint, TokioYield, YIELD_EVERY};
use crate::error::UiForgeError;
use crate::provider::TextProvider;
use crate::types::{GenerationRequest, GenerationResult};

/// Wraps a [`TextProvider`] and always returns a [`GenerationResult`].
///
/// Streamed output is aggregated transparently, so tool handlers never
/// branch on the transport mode.
#[derive(Clone)]
pub struct GenerationBridge {
    provider: Arc<dyn TextProvider>,
    checkpoint: Arc<dyn Checkpoint>,
    yield_every: usize,
}

impl GenerationBridge {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider,
            checkpoint: Arc::new(TokioYield),
            yield_every: YIELD_EVERY,
        }
    }

    /// Replace the scheduler checkpoint awaited while streaming.
    pub fn with_checkpoint(mut self, checkpoint: Arc<dyn Checkpoint>) -> Self {
        self.checkpoint = checkpoint;
        self
    }

    /// Change how many fragments are consumed between checkpoints.
    pub fn with_yield_every(mut self, yield_every: usize) -> Self {
        self.yield_every = yield_every.max(1);
        self
    }

    /// Run one generation.
    ///
    /// Provider failures propagate untouched; nothing is retried and no
    /// partial text survives an error.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, UiForgeError> {
        request.validate()?;

        debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_id(),
            streaming = request.use_streaming(),
            max_tokens = request.max_output_tokens(),
            prompt_chars = request.prompt_text().len(),
            "generation started"
        );

        let result = if request.use_streaming() {
            let stream = self.provider.stream_text(request).await?;
            let aggregate =
                collect_stream(stream, self.checkpoint.as_ref(), self.yield_every).await?;
            if aggregate.fragment_count == 0 {
                return Err(UiForgeError::Stream(
                    "provider stream finished without producing any text".into(),
                ));
            }
            GenerationResult {
                text: aggregate.text,
                usage: aggregate.usage,
                was_streamed: true,
                fragment_count: aggregate.fragment_count,
                finish_reason: aggregate.finish_reason,
            }
        } else {
            let response = self.provider.generate_text(request).await?;
            GenerationResult {
                text: response.text,
                usage: response.usage,
                was_streamed: false,
                fragment_count: 0,
                finish_reason: response.finish_reason,
            }
        };

        info!(
            streamed = result.was_streamed,
            fragments = result.fragment_count,
            output_tokens = result.usage.output_tokens,
            "generation finished"
        );
        Ok(result)
    }
}

impl std::fmt::Debug for GenerationBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationBridge")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.provider.model_id())
            .field("yield_every", &self.yield_every)
            .finish()
    }
}
