//! The envelope every tool invocation returns, success or failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::UiForgeError;

/// One content entry of a tool result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Externally visible result of a tool call.
///
/// Always carries at least one content entry. Failures are reported with
/// `is_error = true` and the message as the only content entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocationResult {
    pub content: Vec<ToolContent>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolInvocationResult {
    /// A successful result with one text entry.
    pub fn success(text: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            metadata,
            is_error: false,
        }
    }

    /// A failed result carrying only the human-readable message.
    pub fn failure(tool_name: &str, error: &UiForgeError) -> Self {
        let mut metadata = Map::new();
        metadata.insert("toolName".into(), Value::String(tool_name.to_string()));
        metadata.insert("errorKind".into(), Value::String(error.kind().to_string()));
        Self {
            content: vec![ToolContent::text(format!("Error: {error}"))],
            metadata,
            is_error: true,
        }
    }

    /// Text of the first content entry.
    pub fn text(&self) -> &str {
        self.content.first().map(ToolContent::as_text).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_has_single_message_entry() {
        let err = UiForgeError::validation("generate_component", "missing required field 'componentName'");

        let result = ToolInvocationResult::failure("generate_component", &err);

        assert!(result.is_error);
        assert_eq!(result.content.len(), 1);
        assert!(result.text().contains("componentName"));
        assert_eq!(result.metadata["errorKind"], "validation");
    }

    #[test]
    fn serializes_wire_shape() {
        let result = ToolInvocationResult::success("hello", Map::new());

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "hello");
        assert_eq!(json["isError"], false);
    }
}
