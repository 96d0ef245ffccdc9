use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;
use tracing::{debug, info, warn};

use hdfs_core::{Error, ToolOutput, ToolRegistry};

const SERVER_NAME: &str = "hdfs-mcp";

const SERVER_INSTRUCTIONS: &str = "HDFS administration tools. Each tool runs one command \
    of the Hadoop client against the configured NameNode and returns its output as text.";

/// Errors that end the stdio serving loop.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("MCP initialization failed: {0}")]
    Initialize(String),

    #[error("MCP service task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// MCP server that dispatches `call_tool` requests to a [`ToolRegistry`].
#[derive(Clone)]
pub struct HdfsMcpServer {
    registry: Arc<ToolRegistry>,
}

impl HdfsMcpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Registered tools in MCP form, ordered by name.
    pub fn tools(&self) -> Vec<McpTool> {
        self.registry
            .definitions()
            .into_iter()
            .map(|def| {
                let schema = Arc::new(def.input_schema());
                McpTool::new(def.name, def.description, schema)
            })
            .collect()
    }

    /// Run one tool by name.
    ///
    /// Only an unknown tool name is a protocol error. Bad arguments and
    /// failed commands come back as an error result the caller can read.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);

        match self.registry.execute(name, arguments).await {
            Ok(output) => {
                debug!(tool = name, is_error = output.is_error, "Tool finished");
                Ok(into_call_result(output))
            }
            Err(Error::UnknownTool(name)) => {
                warn!(tool = %name, "Unknown tool requested");
                Err(McpError::invalid_params(
                    format!("Unknown tool: {}", name),
                    None,
                ))
            }
            Err(e @ Error::InvalidArguments { .. }) => {
                warn!(tool = name, error = %e, "Tool call rejected");
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }

    /// Serve over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> Result<(), ServeError> {
        if self.registry.is_empty() {
            warn!("Starting MCP server with no tools registered");
        }
        info!(tools = self.registry.len(), "Starting MCP server on stdio");

        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| ServeError::Initialize(e.to_string()))?;
        let reason = service.waiting().await?;

        info!(?reason, "MCP server stopped");
        Ok(())
    }
}

fn into_call_result(output: ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.content)];
    if output.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

impl ServerHandler for HdfsMcpServer {
    fn get_info(&self) -> ServerInfo {
        // rmcp's model types are non-exhaustive: start from defaults and set fields.
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = SERVER_NAME.into();
        info.server_info.version = env!("CARGO_PKG_VERSION").into();
        info.server_info.title = Some("HDFS MCP Server".into());
        info.instructions = Some(SERVER_INSTRUCTIONS.into());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = %request.name, "call_tool");
        self.call(&request.name, request.arguments).await
    }
}
