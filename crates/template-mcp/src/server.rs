//! MCP ServerHandler exposing one zero-argument tool per loaded template.
//!
//! The tool set is only known at runtime, so `tools/list` and `tools/call` are
//! answered directly from the [`TemplateRegistry`] instead of a compile-time
//! tool router. Each tool returns a JSON object with `instructions` and, when
//! the definition has one, `template`.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};

use crate::config::ServerConfig;
use crate::error::StartupResult;
use crate::registry::TemplateRegistry;
use crate::template::{TemplateLoader, TemplateResponse};

/// Template MCP server handler.
#[derive(Debug, Clone)]
pub struct TemplateMcpServer {
    registry: Arc<TemplateRegistry>,
}

impl TemplateMcpServer {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Discover templates and build a ready server.
    ///
    /// Fails when the directory is missing or unreadable, or when no template
    /// in it is valid. Skipped files are logged and kept in the registry for
    /// diagnostics.
    pub fn bootstrap(config: &ServerConfig) -> StartupResult<Self> {
        let loader = TemplateLoader::new(&config.templates_path);
        tracing::info!(
            templates_path = %loader.templates_path().display(),
            "Discovering templates"
        );

        let report = loader.load()?;
        let registry = TemplateRegistry::from_report(report)?;

        for entry in registry.entries() {
            tracing::info!(
                tool = %entry.tool.name,
                source = %entry.source.display(),
                "Registered template tool"
            );
        }
        if !registry.skipped().is_empty() {
            tracing::warn!(
                skipped = registry.skipped().len(),
                "Some template files were skipped; see earlier warnings"
            );
        }

        Ok(Self::new(registry))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Look up a template tool by name.
    pub fn invoke(&self, tool_name: &str) -> Option<TemplateResponse> {
        self.registry.invoke(tool_name)
    }

    fn instructions(&self) -> String {
        let names: Vec<&str> = self
            .registry
            .entries()
            .iter()
            .map(|e| e.tool.name.as_ref())
            .collect();
        format!(
            "Document templates for recurring writing tasks. Each tool takes no arguments and \
             returns `instructions` (how to gather information and write the document) and, \
             when available, a markdown `template` whose {{placeholder}} markers describe what \
             to fill in. Follow the instructions, then fill the template.\n\
             Available tools: {}",
            names.join(", ")
        )
    }
}

impl ServerHandler for TemplateMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "template-mcp".to_string(),
                title: Some("Template MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing YAML document templates as zero-argument tools"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(self.instructions()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.registry.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = %request.name, "call_tool");

        if request.arguments.as_ref().is_some_and(|a| !a.is_empty()) {
            tracing::debug!(tool = %request.name, "Ignoring arguments for zero-argument tool");
        }

        let response = self.invoke(&request.name).ok_or_else(|| {
            tracing::warn!(tool = %request.name, "Unknown tool requested");
            McpError::invalid_params(format!("Unknown tool: {}", request.name), None)
        })?;

        let text = serde_json::to_string_pretty(&response)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
