use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use standards_core::envelope::{Failure, QueryEnvelope, TableInfoEnvelope};
use standards_synapse::SynapseTransport;

use crate::{StandardsMcp, helpers};

/// Parameters for running a raw SQL statement.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct QueryTableParams {
    pub sql: String,
}

#[tool_router(router = tool_router_query, vis = "pub")]
impl<T: SynapseTransport + 'static> StandardsMcp<T> {
    #[tool(description = "Run a raw SQL statement against the standards table.")]
    async fn query_table(
        &self,
        Parameters(params): Parameters<QueryTableParams>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.explorer().run_sql(&params.sql).await {
            Ok(output) => helpers::envelope(QueryEnvelope::new(params.sql, output)),
            Err(err) => helpers::envelope(Failure::from_error(&err)),
        }
    }

    #[tool(description = "Describe the standards table and its Synapse project.")]
    async fn get_table_info(&self) -> Result<CallToolResult, ErrorData> {
        helpers::envelope(TableInfoEnvelope::new(self.explorer().config()))
    }
}
