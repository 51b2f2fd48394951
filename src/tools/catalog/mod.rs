//! Built-in UI generation tools.

pub mod accessibility;
pub mod component;
pub mod layout;
pub mod options;
pub mod refactor;
pub mod theme;

use std::sync::Arc;

use serde_json::json;

pub use accessibility::AuditAccessibility;
pub use component::GenerateComponent;
pub use layout::GenerateLayout;
pub use refactor::RefactorComponent;
pub use theme::GenerateTheme;

use super::tool::{GenerativeTool, MAX_TOKENS_ARG, STREAM_ARG};
use super::types::ParameterBuilder;

/// Every built-in tool, in listing order.
pub fn builtin_tools() -> Vec<Arc<dyn GenerativeTool>> {
    vec![
        Arc::new(GenerateComponent::new()),
        Arc::new(RefactorComponent::new()),
        Arc::new(AuditAccessibility::new()),
        Arc::new(GenerateTheme::new()),
        Arc::new(GenerateLayout::new()),
    ]
}

/// Add the `stream` and `maxTokens` arguments every tool accepts.
pub(crate) fn with_generation_options(builder: ParameterBuilder) -> ParameterBuilder {
    builder
        .boolean(STREAM_ARG, "Stream the model output while generating", false)
        .default_value(STREAM_ARG, json!(true))
        .integer(
            MAX_TOKENS_ARG,
            "Override the maximum number of output tokens",
            Some(1),
            Some(i64::from(u32::MAX)),
            false,
        )
}

pub(crate) fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn fenced(source: &str) -> String {
    format!("```\n{}\n```", source.trim_end())
}

/// Character and line counts of a source input.
pub(crate) fn source_metrics(source: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut metrics = serde_json::Map::new();
    metrics.insert("sourceCodeLength".into(), json!(source.chars().count()));
    metrics.insert("sourceCodeLines".into(), json!(source.lines().count()));
    metrics
}
