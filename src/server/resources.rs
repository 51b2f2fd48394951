//! Static and generated reference resources.

use std::fmt::Write as _;
use std::time::Instant;

use serde::Serialize;
use serde_json::json;

use super::registry::ToolRegistry;
use crate::error::UiForgeError;
use crate::session::SessionTracker;

pub const GUIDE_URI: &str = "uiforge://docs/guide";
pub const TOOLS_URI: &str = "uiforge://docs/tools";
pub const METRICS_URI: &str = "uiforge://metrics/performance";

/// Listing entry for a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

/// Contents of a read resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBody {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// Server capabilities reported by the performance resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub streaming: bool,
    pub resources: bool,
    pub prompts: bool,
    pub http_transport: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            streaming: true,
            resources: true,
            prompts: true,
            http_transport: false,
        }
    }
}

pub fn descriptors() -> Vec<ResourceDescriptor> {
    vec![
        ResourceDescriptor {
            uri: GUIDE_URI,
            name: "uiforge guide",
            description: "How to use the uiforge tools and prompts",
            mime_type: "text/markdown",
        },
        ResourceDescriptor {
            uri: TOOLS_URI,
            name: "tool catalogue",
            description: "Every tool with its arguments, defaults and token budget",
            mime_type: "text/markdown",
        },
        ResourceDescriptor {
            uri: METRICS_URI,
            name: "performance metrics",
            description: "Uptime, memory, registered tools and active sessions",
            mime_type: "application/json",
        },
    ]
}

const GUIDE: &str = r#"# uiforge

uiforge turns short descriptions into UI code using a hosted language model.

## Tools

- `generate_component`: a new component from a name and a design description
- `refactor_component`: rewrite existing source toward chosen goals
- `audit_accessibility`: find accessibility issues, optionally with fixes
- `generate_theme`: colour, type and spacing tokens for a brand
- `generate_layout`: a full page layout from ordered sections

Every tool accepts `stream` (default `true`) and `maxTokens` (at least 1).
Results carry `metadata` with the tool name, session id, whether the output
was streamed, the number of streamed chunks, timing and token usage.

## Prompts

- `component-review`
- `design-system-kickoff`
- `accessibility-remediation`

Prompts are returned as text for the client to use; the server never runs them.

## Errors

Failed calls return `isError: true` with a single text entry. Invalid
arguments are rejected before the model is called.
"#;

/// Current resident memory of this process, when the platform exposes it.
#[cfg(target_os = "linux")]
pub fn resident_memory_bytes() -> Option<u64> {
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(pages * 4096)
}

#[cfg(not(target_os = "linux"))]
pub fn resident_memory_bytes() -> Option<u64> {
    None
}

/// Everything a resource read may need.
pub(crate) struct ResourceContext<'a> {
    pub registry: &'a ToolRegistry,
    pub sessions: &'a SessionTracker,
    pub started_at: Instant,
    pub features: FeatureFlags,
}

pub(crate) fn read(uri: &str, ctx: &ResourceContext<'_>) -> Result<ResourceBody, UiForgeError> {
    let (mime_type, text) = match uri {
        GUIDE_URI => ("text/markdown", GUIDE.to_string()),
        TOOLS_URI => ("text/markdown", tool_catalogue(ctx.registry)),
        METRICS_URI => ("application/json", performance_report(ctx)?),
        _ => return Err(UiForgeError::NotFound(format!("resource '{uri}'"))),
    };
    Ok(ResourceBody {
        uri: uri.to_string(),
        mime_type,
        text,
    })
}

fn tool_catalogue(registry: &ToolRegistry) -> String {
    let mut out = String::from("# Tool catalogue\n");
    for tool in registry.iter() {
        let schema = &tool.parameters().schema;
        let required = tool.parameters().required();
        let _ = write!(
            out,
            "\n## `{}`\n\n{}\n\nMax output tokens: {}\n\n| Argument | Type | Required | Default |\n|---|---|---|---|\n",
            tool.name(),
            tool.description(),
            tool.max_output_tokens()
        );
        if let Some(props) = schema.get("properties").and_then(|p| p.as_object()) {
            for (name, prop) in props {
                let ty = match (prop.get("type").and_then(|t| t.as_str()), prop.get("enum")) {
                    (_, Some(values)) => values
                        .as_array()
                        .map(|v| {
                            v.iter()
                                .filter_map(|x| x.as_str())
                                .collect::<Vec<_>>()
                                .join(" \\| ")
                        })
                        .unwrap_or_default(),
                    (Some(t), None) => t.to_string(),
                    (None, None) => "any".to_string(),
                };
                let default = prop
                    .get("default")
                    .map(|d| format!("`{d}`"))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "| `{name}` | {ty} | {} | {default} |",
                    if required.contains(&name.as_str()) { "yes" } else { "no" }
                );
            }
        }
    }
    out
}

fn performance_report(ctx: &ResourceContext<'_>) -> Result<String, UiForgeError> {
    let report = json!({
        "uptimeSeconds": ctx.started_at.elapsed().as_secs(),
        "residentMemoryBytes": resident_memory_bytes(),
        "tools": ctx.registry.names(),
        "features": ctx.features,
        "activeSessions": ctx.sessions.active_count(),
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context<'a>(registry: &'a ToolRegistry, sessions: &'a SessionTracker) -> ResourceContext<'a> {
        ResourceContext {
            registry,
            sessions,
            started_at: Instant::now(),
            features: FeatureFlags::default(),
        }
    }

    #[test]
    fn catalogue_lists_every_tool() {
        let registry = ToolRegistry::with_builtin_tools().unwrap();
        let sessions = SessionTracker::new();

        let body = read(TOOLS_URI, &context(&registry, &sessions)).unwrap();

        for name in registry.names() {
            assert!(body.text.contains(&format!("## `{name}`")));
        }
        assert!(body.text.contains("| `componentName` | string | yes |"));
    }

    #[test]
    fn metrics_report_is_json() {
        let registry = ToolRegistry::with_builtin_tools().unwrap();
        let sessions = SessionTracker::new();
        sessions.start_session("a");

        let body = read(METRICS_URI, &context(&registry, &sessions)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body.text).unwrap();

        assert_eq!(value["activeSessions"], 1);
        assert_eq!(value["tools"].as_array().unwrap().len(), 5);
        assert_eq!(value["features"]["streaming"], true);
    }

    #[test]
    fn unknown_uri_is_not_found() {
        let registry = ToolRegistry::new();
        let sessions = SessionTracker::new();

        let err = read("uiforge://nope", &context(&registry, &sessions)).unwrap_err();

        assert!(matches!(err, UiForgeError::NotFound(_)));
    }
}
