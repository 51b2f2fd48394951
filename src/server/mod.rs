//! Protocol-agnostic dispatcher binding tools, resources and prompts.

pub mod prompts;
pub mod registry;
pub mod resources;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub use prompts::{builtin_prompts, PromptArgumentSpec, PromptTemplate, RenderedPrompt};
pub use registry::{ToolDescriptor, ToolRegistry};
pub use resources::{FeatureFlags, ResourceBody, ResourceDescriptor};

use crate::error::UiForgeError;
use crate::generation::GenerationBridge;
use crate::session::SessionTracker;
use crate::tools::ToolInvoker;
use crate::types::ToolInvocationResult;

/// Name reported to clients.
pub const SERVER_NAME: &str = "uiforge";

#[derive(Debug)]
struct Inner {
    registry: ToolRegistry,
    invoker: ToolInvoker,
    prompts: Vec<PromptTemplate>,
    started_at: Instant,
    features: FeatureFlags,
}

/// Dispatches tool calls, resource reads and prompt requests.
///
/// Cheap to clone; transports hold their own handle.
#[derive(Debug, Clone)]
pub struct UiForgeServer {
    inner: Arc<Inner>,
}

impl UiForgeServer {
    pub fn new(registry: ToolRegistry, bridge: GenerationBridge, sessions: SessionTracker) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry,
                invoker: ToolInvoker::new(bridge, sessions),
                prompts: builtin_prompts(),
                started_at: Instant::now(),
                features: FeatureFlags::default(),
            }),
        }
    }

    /// Server with every built-in tool registered.
    pub fn with_builtin_tools(
        bridge: GenerationBridge,
        sessions: SessionTracker,
    ) -> Result<Self, UiForgeError> {
        Ok(Self::new(ToolRegistry::with_builtin_tools()?, bridge, sessions))
    }

    /// Replace the reported feature flags. Only valid before the server is shared.
    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.features = features;
        }
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.inner.registry
    }

    pub fn sessions(&self) -> &SessionTracker {
        self.inner.invoker.sessions()
    }

    pub fn features(&self) -> FeatureFlags {
        self.inner.features
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.inner.registry.descriptors()
    }

    /// Run a tool inside a session, creating the session when unknown.
    ///
    /// Only an unknown tool name is an `Err`; every other failure is carried
    /// by the returned envelope.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
        session_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ToolInvocationResult, UiForgeError> {
        let tool = self
            .inner
            .registry
            .get(name)
            .ok_or_else(|| UiForgeError::UnknownTool(name.to_string()))?;

        self.sessions().ensure_session(session_id);
        info!(tool = name, session_id, "dispatching tool call");
        Ok(self
            .inner
            .invoker
            .invoke(tool.as_ref(), &arguments, session_id, cancel)
            .await)
    }

    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        resources::descriptors()
    }

    pub fn read_resource(&self, uri: &str) -> Result<ResourceBody, UiForgeError> {
        resources::read(
            uri,
            &resources::ResourceContext {
                registry: &self.inner.registry,
                sessions: self.sessions(),
                started_at: self.inner.started_at,
                features: self.inner.features,
            },
        )
    }

    pub fn list_prompts(&self) -> &[PromptTemplate] {
        &self.inner.prompts
    }

    pub fn get_prompt(
        &self,
        name: &str,
        arguments: &BTreeMap<String, String>,
    ) -> Result<RenderedPrompt, UiForgeError> {
        self.inner
            .prompts
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| UiForgeError::NotFound(format!("prompt '{name}'")))?
            .render(arguments)
    }

    /// Everything the server offers, as one JSON document.
    pub fn capabilities(&self) -> Value {
        json!({
            "server": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
            "tools": self.list_tools(),
            "resources": self.list_resources(),
            "prompts": self.list_prompts(),
        })
    }
}
