//! Tests for core types.

use pretty_assertions::assert_eq;
use serde_json::{json, Map};
use uiforge::error::UiForgeError;
use uiforge::types::*;

#[test]
fn request_builder_defaults() {
    let request = GenerationRequest::builder()
        .prompt_text("Build a navbar")
        .max_output_tokens(100)
        .build();

    assert_eq!(request.temperature(), 0.7);
    assert!(request.use_streaming());
    assert!(request.validate().is_ok());
}

#[test]
fn request_validation_rejects_degenerate_input() {
    let blank = GenerationRequest::builder()
        .prompt_text("   ")
        .max_output_tokens(100)
        .build();
    let hot = GenerationRequest::builder()
        .prompt_text("Build a navbar")
        .max_output_tokens(100)
        .temperature(1.5)
        .build();

    assert!(blank.validate().is_err());
    assert!(hot.validate().unwrap_err().to_string().contains("temperature"));
}

#[test]
fn success_envelope_wire_shape() {
    let mut metadata = Map::new();
    metadata.insert("toolName".into(), json!("generate_theme"));

    let result = ToolInvocationResult::success(":root {}", metadata);

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "content": [{"type": "text", "text": ":root {}"}],
            "metadata": {"toolName": "generate_theme"},
            "isError": false
        })
    );
}

#[test]
fn failure_envelope_carries_kind() {
    let err = UiForgeError::Stream("connection reset".into());

    let result = ToolInvocationResult::failure("generate_layout", &err);

    assert!(result.is_error);
    assert_eq!(result.text(), "Error: Stream error: connection reset");
    assert_eq!(result.metadata["errorKind"], json!("provider"));
}

#[test]
fn finish_reasons_from_anthropic() {
    assert_eq!(FinishReason::from_anthropic("end_turn"), Some(FinishReason::Stop));
    assert_eq!(FinishReason::from_anthropic("stop_sequence"), Some(FinishReason::Stop));
    assert_eq!(FinishReason::from_anthropic("max_tokens"), Some(FinishReason::Length));
    assert_eq!(FinishReason::from_anthropic("refusal"), Some(FinishReason::ContentFilter));
}

#[test]
fn usage_serializes_camel_case() {
    let usage = Usage {
        input_tokens: 3,
        output_tokens: 4,
        total_tokens: 7,
        ..Default::default()
    };

    let value = serde_json::to_value(&usage).unwrap();

    assert_eq!(value["inputTokens"], json!(3));
    assert_eq!(value["totalTokens"], json!(7));
}
