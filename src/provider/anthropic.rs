//! Anthropic Messages API provider.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::UiForgeError;
use crate::types::*;

use super::http::{anthropic_headers, build_client, parse_sse_data, status_to_error};
use super::{ProviderResponse, TextProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const API_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

pub struct AnthropicProvider {
    model: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: Option<String>,
    ) -> Result<Self, UiForgeError> {
        Ok(Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: build_client(REQUEST_TIMEOUT)?,
        })
    }

    fn build_request_body(&self, request: &GenerationRequest, stream: bool) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_output_tokens(),
            "temperature": request.temperature(),
            "stream": stream,
            "messages": [{
                "role": "user",
                "content": request.prompt_text(),
            }],
        })
    }

    async fn post(&self, body: &serde_json::Value) -> Result<reqwest::Response, UiForgeError> {
        let url = format!("{}/messages", self.base_url);
        let resp = self
            .client
            .post(&url)
            .headers(anthropic_headers(&self.api_key, API_VERSION)?)
            .json(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let headers = resp.headers().clone();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &headers, &body_text));
        }
        Ok(resp)
    }
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate_text(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderResponse, UiForgeError> {
        let body = self.build_request_body(request, false);
        debug!(model = self.model.as_str(), "Anthropic generate_text");

        let data: AnthropicResponse = self.post(&body).await?.json().await?;

        let text = data
            .content
            .iter()
            .filter(|block| block.r#type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<String>();

        Ok(ProviderResponse {
            text,
            usage: data.usage.into(),
            finish_reason: data.stop_reason.as_deref().and_then(FinishReason::from_anthropic),
        })
    }

    async fn stream_text(&self, request: &GenerationRequest) -> Result<DeltaStream, UiForgeError> {
        let body = self.build_request_body(request, true);
        debug!(model = self.model.as_str(), "Anthropic stream_text");

        let byte_stream = self.post(&body).await?.bytes_stream();

        let stream = async_stream::stream! {
            let mut buffer: Vec<u8> = Vec::new();
            let mut usage = Usage::default();
            let mut finish_reason = None;
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(UiForgeError::Network(e));
                        return;
                    }
                };

                buffer.extend_from_slice(&chunk);

                while let Some(next) = take_line(&mut buffer) {
                    let line = match next {
                        Ok(line) => line,
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    };

                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }
                    let Some(data) = parse_sse_data(&line) else {
                        continue;
                    };
                    let event: StreamEvent = match serde_json::from_str(data) {
                        Ok(event) => event,
                        Err(e) => {
                            warn!(error = %e, "skipping malformed Anthropic stream event");
                            continue;
                        }
                    };

                    match event {
                        StreamEvent::MessageStart { message } => {
                            usage.absorb(&message.usage.into());
                            yield Ok(TextStreamDelta::usage(usage.clone()));
                        }
                        StreamEvent::ContentBlockDelta { delta } => {
                            if let BlockDelta::TextDelta { text } = delta {
                                yield Ok(TextStreamDelta::text(text));
                            }
                        }
                        StreamEvent::MessageDelta { delta, usage: delta_usage } => {
                            if let Some(u) = delta_usage {
                                usage.absorb(&u.into());
                            }
                            if let Some(reason) = delta.stop_reason.as_deref() {
                                finish_reason = FinishReason::from_anthropic(reason);
                            }
                        }
                        StreamEvent::MessageStop => {
                            yield Ok(TextStreamDelta::done(finish_reason, Some(usage.clone())));
                            return;
                        }
                        StreamEvent::Error { error } => {
                            yield Err(UiForgeError::provider("anthropic", error.message));
                            return;
                        }
                        StreamEvent::Other => {}
                    }
                }
            }

            yield Err(UiForgeError::Stream(
                "Anthropic stream ended before message_stop".to_string(),
            ));
        };

        Ok(Box::pin(stream))
    }
}

/// Split the first complete line off `buffer`, decoding it only once whole.
///
/// Network chunks may end inside a multi-byte character, so bytes stay
/// buffered until a `\n` arrives.
fn take_line(buffer: &mut Vec<u8>) -> Option<Result<String, UiForgeError>> {
    let line_end = buffer.iter().position(|&b| b == b'\n')?;
    let line: Vec<u8> = buffer.drain(..=line_end).collect();
    Some(
        std::str::from_utf8(&line)
            .map(|text| text.trim().to_string())
            .map_err(|e| UiForgeError::Stream(format!("invalid UTF-8 in event stream: {e}"))),
    )
}

// Internal Anthropic response types

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
    stop_reason: Option<String>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct AnthropicContentBlock {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
    #[serde(default)]
    cache_read_input_tokens: Option<u32>,
    #[serde(default)]
    cache_creation_input_tokens: Option<u32>,
}

impl From<AnthropicUsage> for Usage {
    fn from(u: AnthropicUsage) -> Self {
        Usage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
            total_tokens: u.input_tokens + u.output_tokens,
            cache_read_tokens: u.cache_read_input_tokens,
            cache_creation_tokens: u.cache_creation_input_tokens,
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamEvent {
    MessageStart {
        message: StreamMessage,
    },
    ContentBlockDelta {
        delta: BlockDelta,
    },
    MessageDelta {
        delta: MessageDeltaBody,
        #[serde(default)]
        usage: Option<AnthropicUsage>,
    },
    MessageStop,
    Error {
        error: StreamError,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct StreamMessage {
    #[serde(default)]
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BlockDelta {
    TextDelta {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct MessageDeltaBody {
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
struct StreamError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new("claude-test", "test-key", None).unwrap()
    }

    #[test]
    fn request_body_carries_prompt_and_sampling() {
        let request = GenerationRequest::builder()
            .prompt_text("Create a card")
            .max_output_tokens(2500)
            .build();

        let body = provider().build_request_body(&request, true);

        assert_eq!(body["model"], "claude-test");
        assert_eq!(body["max_tokens"], 2500);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Create a card");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let provider =
            AnthropicProvider::new("m", "k", Some("http://localhost:9999/v1/".into())).unwrap();
        assert_eq!(provider.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn stream_events_deserialize() {
        let start: StreamEvent = serde_json::from_str(
            r#"{"type":"message_start","message":{"id":"m","usage":{"input_tokens":9,"output_tokens":1}}}"#,
        )
        .unwrap();
        assert!(matches!(start, StreamEvent::MessageStart { .. }));

        let ping: StreamEvent = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(ping, StreamEvent::Other));

        let delta: StreamEvent = serde_json::from_str(
            r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#,
        )
        .unwrap();
        match delta {
            StreamEvent::ContentBlockDelta {
                delta: BlockDelta::TextDelta { text },
            } => assert_eq!(text, "Hi"),
            _ => panic!("expected text delta"),
        }
    }

    #[test]
    fn line_split_inside_multibyte_character_is_reassembled() {
        let line = "data: caf\u{e9}\n".as_bytes();
        let split = line.len() - 2;
        let mut buffer = line[..split].to_vec();

        assert!(take_line(&mut buffer).is_none());

        buffer.extend_from_slice(&line[split..]);
        assert_eq!(take_line(&mut buffer).unwrap().unwrap(), "data: caf\u{e9}");
        assert!(buffer.is_empty());
    }

    #[test]
    fn invalid_utf8_line_is_a_stream_error() {
        let mut buffer = vec![b'd', 0xff, b'\n', b'x'];

        let err = take_line(&mut buffer).unwrap().unwrap_err();

        assert!(matches!(err, UiForgeError::Stream(_)));
        assert_eq!(buffer, vec![b'x']);
    }
}
