use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use standards_core::envelope::{Failure, TopicListEnvelope, TopicResolutionEnvelope};
use standards_synapse::SynapseTransport;

use crate::{StandardsMcp, helpers};

/// Parameters for resolving a topic name to its id.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ResolveTopicParams {
    pub topic: String,
}

/// Parameters for searching topics by substring.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchTopicsParams {
    pub query: String,
}

#[tool_router(router = tool_router_topics, vis = "pub")]
impl<T: SynapseTransport + 'static> StandardsMcp<T> {
    #[tool(description = "Resolve a topic name to its topic id, with fuzzy fallback.")]
    async fn resolve_topic(
        &self,
        Parameters(params): Parameters<ResolveTopicParams>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.explorer().resolve_topic(&params.topic).await {
            Ok(resolved) => {
                helpers::envelope(TopicResolutionEnvelope::new(params.topic, resolved))
            }
            Err(err) => helpers::envelope(Failure::from_error(&err)),
        }
    }

    #[tool(description = "List every topic in the topics table.")]
    async fn list_topics(&self) -> Result<CallToolResult, ErrorData> {
        match self.explorer().list_topics().await {
            Ok(topics) => helpers::envelope(TopicListEnvelope::new(topics)),
            Err(err) => helpers::envelope(Failure::from_error(&err)),
        }
    }

    #[tool(description = "Search topics by name or description substring.")]
    async fn search_topics(
        &self,
        Parameters(params): Parameters<SearchTopicsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.explorer().search_topics(&params.query).await {
            Ok(topics) => helpers::envelope(TopicListEnvelope::new(topics)),
            Err(err) => helpers::envelope(Failure::from_error(&err)),
        }
    }
}
