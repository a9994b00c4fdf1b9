use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use standards_core::envelope::{Failure, SearchEnvelope, VariationsEnvelope};
use standards_synapse::SynapseTransport;

use crate::{StandardsMcp, helpers};

const DEFAULT_MAX_RESULTS: usize = 10;

/// Parameters for a single-term standards search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchStandardsParams {
    pub query: String,
    pub max_results: Option<usize>,
    pub offset: Option<usize>,
    /// Also match rows classified under a topic resembling the query.
    pub topic_search: Option<bool>,
}

/// Parameters for a multi-variation standards search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchVariationsParams {
    pub query: String,
    /// Alternative spellings or phrasings, searched after `query` in order.
    pub variations: Vec<String>,
    pub max_results_per_term: Option<usize>,
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl<T: SynapseTransport + 'static> StandardsMcp<T> {
    #[tool(
        description = "Search the standards table by substring over the configured columns."
    )]
    async fn search_standards(
        &self,
        Parameters(params): Parameters<SearchStandardsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let max_results = params.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        let offset = params.offset.unwrap_or(0);
        let topic_search = params.topic_search.unwrap_or(false);
        match self
            .explorer()
            .search_one(&params.query, max_results, offset, topic_search)
            .await
        {
            Ok(outcome) => helpers::envelope(SearchEnvelope::new(
                params.query,
                max_results,
                offset,
                outcome,
            )),
            Err(err) => helpers::envelope(Failure::from_error(&err)),
        }
    }

    #[tool(
        description = "Search the standards table once per term variation, deduplicating rows by record id."
    )]
    async fn search_standards_with_variations(
        &self,
        Parameters(params): Parameters<SearchVariationsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let per_term = params.max_results_per_term.unwrap_or(DEFAULT_MAX_RESULTS);
        let mut terms = Vec::with_capacity(params.variations.len() + 1);
        terms.push(params.query.clone());
        terms.extend(params.variations);
        let aggregate = self
            .explorer()
            .search_variations(&params.query, &terms, per_term)
            .await;
        helpers::envelope(VariationsEnvelope::new(params.query, aggregate))
    }
}
