//! MCP server implementation for standards-mcp.
//!
//! This crate wires the standards explorer into rmcp tool handlers and
//! exposes the MCP-facing API surface for search and topic lookup.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use standards_core::explorer::StandardsExplorer;
use standards_synapse::SynapseTransport;

const SERVER_INSTRUCTIONS: &str = r"standards-mcp provides MCP tools for searching the Bridge2AI Standards Explorer table on Synapse.

Workflow:
1. `search_standards` is the primary entry point. Pass `topic_search: true` to also match
   rows classified under a topic whose name resembles the query.
2. `search_standards_with_variations` fans one concept out over spelling/phrasing variants
   and deduplicates the combined rows by record id.
3. Topics: `list_topics`, `search_topics`, and `resolve_topic` map human topic names to
   topic ids.
4. `query_table` runs raw SQL against the table for anything the search tools cannot
   express. `get_table_info` describes the table and its Synapse project.

Notes:
- Queries execute asynchronously on Synapse; each tool submits a job and polls until the
  result bundle is ready.
- Every tool returns a JSON envelope with a `success` flag; failures carry `error` and
  optional `details` instead of raising.
- Reads usually work unauthenticated, but Synapse may require a personal access token
  (SYNAPSE_AUTH_TOKEN) for some tables.
- `health` returns `ok`.";

/// MCP server wrapper around the standards explorer and tool routers.
pub struct StandardsMcp<T: SynapseTransport> {
    tool_router: ToolRouter<Self>,
    explorer: Arc<StandardsExplorer<T>>,
}

impl<T: SynapseTransport> Clone for StandardsMcp<T> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            explorer: self.explorer.clone(),
        }
    }
}

impl<T: SynapseTransport + 'static> StandardsMcp<T> {
    /// Creates a new server using an explorer by value.
    #[must_use]
    pub fn new(explorer: StandardsExplorer<T>) -> Self {
        Self::with_explorer(Arc::new(explorer))
    }

    /// Creates a new server using a shared explorer handle.
    #[must_use]
    pub fn with_explorer(explorer: Arc<StandardsExplorer<T>>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_query()
            + Self::tool_router_search()
            + Self::tool_router_topics();
        Self {
            tool_router,
            explorer,
        }
    }

    pub(crate) fn explorer(&self) -> &StandardsExplorer<T> {
        &self.explorer
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<T: SynapseTransport + 'static> StandardsMcp<T> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl<T: SynapseTransport + 'static> ServerHandler for StandardsMcp<T> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
