//! MCP over stdio, backed by rmcp.

use std::collections::BTreeMap;

use rmcp::{
    model::{
        AnnotateAble, CallToolRequestParams, CallToolResult, Content, GetPromptRequestParams,
        GetPromptResult, Implementation, JsonObject, ListPromptsResult, ListResourcesResult,
        ListToolsResult, PaginatedRequestParams, Prompt, PromptArgument, PromptMessage,
        PromptMessageRole, RawResource, ReadResourceRequestParams, ReadResourceResult,
        ResourceContents, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ErrorKind, UiForgeError};
use crate::server::{UiForgeServer, SERVER_NAME};
use crate::session::SessionTracker;
use crate::types::ToolInvocationResult;

const INSTRUCTIONS: &str = "uiforge generates UI components, themes and layouts, refactors \
    components and audits accessibility. Read uiforge://docs/guide for usage.";

/// rmcp handler for one client connection; the connection is one session.
#[derive(Debug, Clone)]
pub struct McpHandler {
    server: UiForgeServer,
    session_id: String,
}

impl McpHandler {
    pub fn new(server: UiForgeServer) -> Self {
        let session_id = SessionTracker::new_session_id();
        server.sessions().start_session(&session_id);
        Self { server, session_id }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Serve MCP on stdin/stdout until the client disconnects.
pub async fn serve_stdio(server: UiForgeServer) -> Result<(), UiForgeError> {
    let handler = McpHandler::new(server);
    info!(session_id = handler.session_id(), "serving MCP over stdio");

    let service = handler
        .serve(stdio())
        .await
        .map_err(|e| UiForgeError::Internal(format!("MCP initialization failed: {e}")))?;
    service
        .waiting()
        .await
        .map_err(|e| UiForgeError::Internal(format!("MCP service stopped: {e}")))?;

    info!("MCP client disconnected");
    Ok(())
}

fn to_mcp_error(err: UiForgeError) -> McpError {
    match (&err, err.kind()) {
        (UiForgeError::NotFound(_), _) => McpError::resource_not_found(err.to_string(), None),
        (_, ErrorKind::Validation) => McpError::invalid_params(err.to_string(), None),
        _ => McpError::internal_error(err.to_string(), None),
    }
}

/// Map the tool envelope onto an MCP tool result; metadata rides as structured content.
pub fn to_call_tool_result(result: ToolInvocationResult) -> CallToolResult {
    let content = result
        .content
        .iter()
        .map(|c| Content::text(c.as_text()))
        .collect();
    let mut out = if result.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    };
    out.structured_content = Some(Value::Object(result.metadata));
    out
}

fn prompt_arguments(arguments: Option<JsonObject>) -> BTreeMap<String, String> {
    arguments
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Null => None,
            other => Some((key, other.to_string())),
        })
        .collect()
}

impl ServerHandler for McpHandler {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self
            .server
            .list_tools()
            .into_iter()
            .map(|d| {
                let schema: JsonObject = d.input_schema.as_object().cloned().unwrap_or_default();
                Tool::new(d.name, d.description, schema)
            })
            .collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = Value::Object(request.arguments.unwrap_or_default());
        let result = self
            .server
            .call_tool(&request.name, arguments, &self.session_id, &context.ct)
            .await
            .map_err(to_mcp_error)?;
        Ok(to_call_tool_result(result))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self
            .server
            .list_resources()
            .into_iter()
            .map(|d| {
                let mut raw = RawResource::new(d.uri, d.name.to_string());
                raw.description = Some(d.description.to_string());
                raw.mime_type = Some(d.mime_type.to_string());
                raw.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let body = self.server.read_resource(&request.uri).map_err(|e| match e {
            UiForgeError::NotFound(_) => McpError::resource_not_found(
                "Resource not found",
                Some(json!({ "uri": request.uri })),
            ),
            other => to_mcp_error(other),
        })?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(body.text, body.uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        let prompts = self
            .server
            .list_prompts()
            .iter()
            .map(|p| {
                let arguments = p
                    .arguments
                    .iter()
                    .map(|a| PromptArgument {
                        name: a.name.to_string(),
                        title: None,
                        description: Some(a.description.to_string()),
                        required: Some(a.required),
                    })
                    .collect();
                Prompt::new(p.name, Some(p.description), Some(arguments))
            })
            .collect();
        Ok(ListPromptsResult::with_all_items(prompts))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let values = prompt_arguments(request.arguments);
        let rendered = self
            .server
            .get_prompt(&request.name, &values)
            .map_err(|e| match e {
                UiForgeError::NotFound(_) => McpError::invalid_params(e.to_string(), None),
                other => to_mcp_error(other),
            })?;
        Ok(GetPromptResult {
            description: Some(rendered.description),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, rendered.text)],
        })
    }
}
