//! Typed access to validated tool arguments.

use std::str::FromStr;

use serde_json::Value;

use crate::error::UiForgeError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArguments {
    tool: String,
    value: Value,
}

impl ToolArguments {
    pub fn new(value: Value) -> Self {
        Self::for_tool("arguments", value)
    }

    /// Arguments belonging to a named tool; errors name the tool.
    pub fn for_tool(tool: impl Into<String>, value: Value) -> Self {
        Self {
            tool: tool.into(),
            value,
        }
    }

    fn missing(&self, kind: &str, key: &str) -> UiForgeError {
        UiForgeError::validation(&self.tool, format!("Missing {kind} argument: {key}"))
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, UiForgeError> {
        self.value
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| self.missing("string", key))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// Get a boolean argument.
    pub fn get_bool(&self, key: &str) -> Result<bool, UiForgeError> {
        self.value
            .get(key)
            .and_then(Value::as_bool)
            .ok_or_else(|| self.missing("boolean", key))
    }

    /// Get an optional boolean, falling back to `default`.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.value.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Get an optional positive integer that fits in a u32.
    pub fn get_u32_opt(&self, key: &str) -> Result<Option<u32>, UiForgeError> {
        match self.value.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| {
                    UiForgeError::validation(
                        &self.tool,
                        format!("{key} must be a non-negative integer, got {v}"),
                    )
                }),
        }
    }

    /// Get a list of strings. Absent lists are empty.
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>, UiForgeError> {
        match self.value.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        UiForgeError::validation(
                            &self.tool,
                            format!("{key} must only contain strings"),
                        )
                    })
                })
                .collect(),
            Some(_) => Err(self.missing("array", key)),
        }
    }

    /// Parse a string argument into an enum.
    pub fn get_enum<T: FromStr>(&self, key: &str) -> Result<T, UiForgeError> {
        let raw = self.get_str(key)?;
        raw.parse()
            .map_err(|_| UiForgeError::validation(&self.tool, format!("unsupported {key} '{raw}'")))
    }

    /// Parse every entry of a string list into an enum.
    pub fn get_enum_list<T: FromStr>(&self, key: &str) -> Result<Vec<T>, UiForgeError> {
        self.get_string_list(key)?
            .iter()
            .map(|raw| {
                raw.parse().map_err(|_| {
                    UiForgeError::validation(&self.tool, format!("unsupported {key} entry '{raw}'"))
                })
            })
            .collect()
    }
}
