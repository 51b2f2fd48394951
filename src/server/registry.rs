//! Name-indexed set of generative tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::UiForgeError;
use crate::tools::GenerativeTool;

/// Listing entry for a registered tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub max_output_tokens: u32,
}

/// Tools in registration order, looked up by name.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn GenerativeTool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool.
    pub fn with_builtin_tools() -> Result<Self, UiForgeError> {
        let mut registry = Self::new();
        for tool in crate::tools::builtin_tools() {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Add a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn GenerativeTool>) -> Result<(), UiForgeError> {
        let name = tool.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(UiForgeError::Configuration(format!(
                "tool '{name}' is already registered"
            )));
        }
        self.by_name.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn GenerativeTool>> {
        self.by_name.get(name).map(|&idx| &self.tools[idx])
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn GenerativeTool>> {
        self.tools.iter()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.parameters().schema.clone(),
                max_output_tokens: tool.max_output_tokens(),
            })
            .collect()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
