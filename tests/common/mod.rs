//! Shared test helpers and mock provider.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use uiforge::error::UiForgeError;
use uiforge::generation::GenerationBridge;
use uiforge::provider::{ProviderResponse, TextProvider};
use uiforge::server::UiForgeServer;
use uiforge::session::SessionTracker;
use uiforge::types::*;

/// A mock provider with scripted output.
///
/// Buffered calls return `text`; streamed calls emit `fragments` in order,
/// failing on fragment `fail_at` (1-based) when set.
pub struct MockProvider {
    text: String,
    fragments: Vec<String>,
    fail_at: Option<usize>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            text: "export function Button() { return <button /> }".to_string(),
            fragments: ["export ", "function ", "Button() ", "{ return <button /> }"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fail_at: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_fragments<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fragments = fragments.into_iter().map(Into::into).collect();
        self
    }

    /// Emit `n` numbered fragments: "0,", "1,", ...
    pub fn with_numbered_fragments(self, n: usize) -> Self {
        self.with_fragments((0..n).map(|i| format!("{i},")))
    }

    pub fn failing_at(mut self, fragment: usize) -> Self {
        self.fail_at = Some(fragment);
        self
    }

    /// Number of provider calls made, buffered or streamed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn record(&self, request: &GenerationRequest) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
    }

    fn usage() -> Usage {
        Usage {
            input_tokens: 10,
            output_tokens: 20,
            total_tokens: 30,
            ..Default::default()
        }
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn generate_text(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderResponse, UiForgeError> {
        self.record(request);
        Ok(ProviderResponse {
            text: self.text.clone(),
            usage: Self::usage(),
            finish_reason: Some(FinishReason::Stop),
        })
    }

    async fn stream_text(&self, request: &GenerationRequest) -> Result<DeltaStream, UiForgeError> {
        self.record(request);
        let fragments = self.fragments.clone();
        let fail_at = self.fail_at;

        let stream = async_stream::stream! {
            yield Ok(TextStreamDelta::usage(Usage { input_tokens: 10, ..Default::default() }));
            for (idx, fragment) in fragments.into_iter().enumerate() {
                if Some(idx + 1) == fail_at {
                    yield Err(UiForgeError::Stream(format!("connection dropped at fragment {}", idx + 1)));
                    return;
                }
                yield Ok(TextStreamDelta::text(fragment));
            }
            yield Ok(TextStreamDelta::done(
                Some(FinishReason::Stop),
                Some(Usage { output_tokens: 20, ..Default::default() }),
            ));
        };

        Ok(Box::pin(stream))
    }
}

/// A server over `provider` with all built-in tools and a fresh registry.
pub fn server_with(provider: Arc<MockProvider>) -> UiForgeServer {
    let bridge = GenerationBridge::new(provider);
    UiForgeServer::with_builtin_tools(bridge, SessionTracker::new()).unwrap()
}
