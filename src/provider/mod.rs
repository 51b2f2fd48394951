//! Text-generation provider trait and the Anthropic implementation.

pub mod anthropic;
pub mod http;

pub use anthropic::AnthropicProvider;

use async_trait::async_trait;

use crate::error::UiForgeError;
use crate::types::{DeltaStream, FinishReason, GenerationRequest, Usage};

/// Buffered response from a provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by text-generation backends.
///
/// Implementations never retry; errors go straight back to the caller.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name (e.g., "anthropic").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate text in a single round trip.
    async fn generate_text(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderResponse, UiForgeError>;

    /// Generate text as an incremental stream of deltas.
    ///
    /// The terminal `Done` delta carries the final usage when the provider
    /// reports one.
    async fn stream_text(&self, request: &GenerationRequest) -> Result<DeltaStream, UiForgeError>;
}
