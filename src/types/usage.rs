//! Token usage reported by the provider.

use serde::{Deserialize, Serialize};

/// Token usage for a generation.
///
/// Passed through to tool metadata as-is; uiforge never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_read_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_creation_tokens: Option<u32>,
}

impl Usage {
    /// Fold a later usage report into this one.
    ///
    /// Streaming responses report input tokens when the message starts and
    /// output tokens when it ends, so fields that are zero in `other` keep
    /// their current value.
    pub fn absorb(&mut self, other: &Usage) {
        if other.input_tokens > 0 {
            self.input_tokens = other.input_tokens;
        }
        if other.output_tokens > 0 {
            self.output_tokens = other.output_tokens;
        }
        if other.cache_read_tokens.is_some() {
            self.cache_read_tokens = other.cache_read_tokens;
        }
        if other.cache_creation_tokens.is_some() {
            self.cache_creation_tokens = other.cache_creation_tokens;
        }
        self.total_tokens = self.input_tokens + self.output_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_keeps_input_tokens_from_message_start() {
        let mut usage = Usage {
            input_tokens: 12,
            total_tokens: 12,
            ..Default::default()
        };

        usage.absorb(&Usage {
            output_tokens: 40,
            ..Default::default()
        });

        assert_eq!(usage.input_tokens, 12);
        assert_eq!(usage.output_tokens, 40);
        assert_eq!(usage.total_tokens, 52);
    }

    #[test]
    fn serializes_camel_case_and_skips_empty_cache_fields() {
        let usage = Usage {
            input_tokens: 1,
            output_tokens: 2,
            total_tokens: 3,
            ..Default::default()
        };

        let json = serde_json::to_value(&usage).unwrap();

        assert_eq!(json["inputTokens"], 1);
        assert_eq!(json["totalTokens"], 3);
        assert!(json.get("cacheReadTokens").is_none());
    }
}
