//! MCP server exposing the document index as five tools.
//!
//! Every tool answers with a single text content holding the pretty-printed
//! JSON result mapping. Argument problems are part of that mapping, not MCP
//! protocol errors.

use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use serde::Serialize;
use serde_json::Value;

use crate::service::DocumentService;
use crate::service::operation::{GET_DOCUMENT_CONTENT, GET_DOCUMENT_STATS, LIST_DOCUMENTS, SCAN_DOCUMENTS, SEARCH_DOCUMENTS};

/// Request parameters for document search.
///
/// Values are kept as raw JSON so type checks happen in
/// [`Operation::from_call`](crate::service::Operation::from_call) and come back
/// as result mappings.
#[derive(Debug, Default, serde::Deserialize, Serialize, schemars::JsonSchema)]
pub struct SearchDocumentsParams {
    /// Text to search for in documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub query: Option<Value>,
    /// Maximum number of results to return (default: 50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<u64>")]
    pub max_results: Option<Value>,
}

/// Request parameters for content lookup.
#[derive(Debug, Default, serde::Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetDocumentContentParams {
    /// Name of the document file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub filename: Option<Value>,
}

/// MCP handler backed by a [`DocumentService`].
#[derive(Clone)]
pub struct DocsiftMcp {
    tool_router: ToolRouter<DocsiftMcp>,
    service: DocumentService,
}

#[tool_router]
impl DocsiftMcp {
    pub fn new(service: DocumentService) -> Self {
        Self {
            tool_router: Self::tool_router(),
            service,
        }
    }

    pub fn service(&self) -> &DocumentService {
        &self.service
    }

    /// Rescan the documents directory.
    #[tool(description = "Scan and index all documents in the documents directory")]
    async fn scan_documents(&self, Parameters(_): Parameters<()>) -> Result<CallToolResult, McpError> {
        self.run(SCAN_DOCUMENTS, None).await
    }

    /// Case-insensitive substring search.
    #[tool(description = "Search for text within the indexed documents")]
    async fn search_documents(
        &self,
        Parameters(params): Parameters<SearchDocumentsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(SEARCH_DOCUMENTS, Some(arguments(&params))).await
    }

    #[tool(description = "List all processed documents with their metadata")]
    async fn list_documents(&self, Parameters(_): Parameters<()>) -> Result<CallToolResult, McpError> {
        self.run(LIST_DOCUMENTS, None).await
    }

    #[tool(description = "Get statistics about the document collection")]
    async fn get_document_stats(&self, Parameters(_): Parameters<()>) -> Result<CallToolResult, McpError> {
        self.run(GET_DOCUMENT_STATS, None).await
    }

    #[tool(description = "Get the full content of a specific document")]
    async fn get_document_content(
        &self,
        Parameters(params): Parameters<GetDocumentContentParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(GET_DOCUMENT_CONTENT, Some(arguments(&params))).await
    }
}

impl DocsiftMcp {
    /// Dispatch through [`DocumentService::call`] on the blocking pool and wrap
    /// the mapping as text content.
    async fn run(&self, name: &'static str, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        let service = self.service.clone();
        let value = tokio::task::spawn_blocking(move || service.call(name, arguments.as_ref()))
            .await
            .map_err(|e| McpError::internal_error(format!("Tool task failed: {}", e), None))?;

        Ok(CallToolResult::success(vec![Content::text(render(&value))]))
    }
}

fn arguments<T: Serialize>(params: &T) -> JsonObject {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    }
}

/// Pretty JSON with non-ASCII characters kept as-is.
fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[tool_handler]
impl ServerHandler for DocsiftMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "docsift-mcp".to_string(),
                title: Some("Docsift Document Search MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Index and search a directory of PDF, Word, Excel and plain text documents. Run \
                 scan_documents after files change, then use search_documents for case-insensitive \
                 substring search and get_document_content to read a document in full."
                    .to_string(),
            ),
        }
    }
}

/// Serve `service` over stdio until the client disconnects.
///
/// # Example
///
/// ```rust,no_run
/// use docsift::mcp::start_mcp_server;
/// use docsift::service::DocumentService;
/// use docsift::IndexConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let service = DocumentService::from_config(IndexConfig::default())?;
///     start_mcp_server(service).await?;
///     Ok(())
/// }
/// ```
pub async fn start_mcp_server(service: DocumentService) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let running = DocsiftMcp::new(service).serve(stdio()).await?;

    running.waiting().await?;
    Ok(())
}
