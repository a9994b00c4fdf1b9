//! Uniform result envelopes for the tool boundary.
//!
//! Every externally observable operation answers with a `success` flag plus
//! op-specific data; failures carry a non-empty `error` string and optional
//! `details`. All error kinds are mapped here, so nothing crosses the tool
//! boundary as an `Err`.

use serde::Serialize;

use standards_synapse::{SelectColumn, SynapseError};

use crate::explorer::{AggregatedSearch, ExplorerConfig, ExplorerError, QueryOutput, SearchOutcome};
use crate::topics::{ResolvedTopic, TopicEntry};

/// Failure half of the envelope contract.
#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_topics: Option<Vec<String>>,
}

impl Failure {
    #[must_use]
    pub fn from_error(err: &ExplorerError) -> Self {
        match err {
            ExplorerError::Synapse(SynapseError::Http { status, body }) => Self::new(
                format!("HTTP error occurred: {status}"),
                Some(body.clone()),
            ),
            ExplorerError::Synapse(inner) => Self::new(inner.to_string(), None),
            ExplorerError::TopicNotFound { topic, known } => Self {
                success: false,
                error: format!("no topic matches '{topic}'"),
                details: Some("known topic ids are listed under known_topics".to_string()),
                known_topics: Some(known.clone()),
            },
        }
    }

    fn new(error: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error,
            details,
            known_topics: None,
        }
    }
}

/// Column descriptor as reported to tool callers.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

impl From<SelectColumn> for ColumnInfo {
    fn from(column: SelectColumn) -> Self {
        Self {
            name: column.name,
            column_type: column.column_type,
        }
    }
}

fn column_infos(columns: Vec<SelectColumn>) -> Vec<ColumnInfo> {
    columns.into_iter().map(ColumnInfo::from).collect()
}

/// Successful raw-SQL query result.
#[derive(Debug, Serialize)]
pub struct QueryEnvelope {
    pub success: bool,
    pub sql: String,
    pub total_results: i64,
    pub returned_results: usize,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryEnvelope {
    #[must_use]
    pub fn new(sql: impl Into<String>, output: QueryOutput) -> Self {
        let total_results = output.total_or_returned();
        let returned_results = output.returned();
        Self {
            success: true,
            sql: sql.into(),
            total_results,
            returned_results,
            columns: column_infos(output.columns),
            rows: output.rows.into_iter().map(|row| row.values).collect(),
        }
    }
}

/// Successful single-term search result.
#[derive(Debug, Serialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub query: String,
    pub total_results: i64,
    pub returned_results: usize,
    pub offset: usize,
    pub max_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_topic: Option<ResolvedTopic>,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SearchEnvelope {
    #[must_use]
    pub fn new(
        query: impl Into<String>,
        max_results: usize,
        offset: usize,
        outcome: SearchOutcome,
    ) -> Self {
        let output = outcome.output;
        let total_results = output.total_or_returned();
        let returned_results = output.returned();
        Self {
            success: true,
            query: query.into(),
            total_results,
            returned_results,
            offset,
            max_results,
            matched_topic: outcome.matched_topic,
            columns: column_infos(output.columns),
            rows: output.rows.into_iter().map(|row| row.values).collect(),
        }
    }
}

/// One deduplicated row of a variation aggregate.
#[derive(Debug, Serialize)]
pub struct VariationHit {
    pub values: Vec<Option<String>>,
    pub matched_term: String,
    pub is_original_term: bool,
}

/// Successful multi-term aggregation result.
#[derive(Debug, Serialize)]
pub struct VariationsEnvelope {
    pub success: bool,
    pub query: String,
    pub terms_searched: Vec<String>,
    pub total_results: usize,
    pub columns: Vec<ColumnInfo>,
    pub results: Vec<VariationHit>,
}

impl VariationsEnvelope {
    #[must_use]
    pub fn new(query: impl Into<String>, aggregate: AggregatedSearch) -> Self {
        Self {
            success: true,
            query: query.into(),
            terms_searched: aggregate.terms,
            total_results: aggregate.hits.len(),
            columns: column_infos(aggregate.columns),
            results: aggregate
                .hits
                .into_iter()
                .map(|hit| VariationHit {
                    values: hit.values,
                    matched_term: hit.matched_term,
                    is_original_term: hit.is_original_term,
                })
                .collect(),
        }
    }
}

/// Successful topic resolution.
#[derive(Debug, Serialize)]
pub struct TopicResolutionEnvelope {
    pub success: bool,
    pub query: String,
    pub topic_id: String,
    pub topic_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<TopicEntry>,
}

impl TopicResolutionEnvelope {
    #[must_use]
    pub fn new(query: impl Into<String>, resolved: ResolvedTopic) -> Self {
        Self {
            success: true,
            query: query.into(),
            topic_id: resolved.id,
            topic_name: resolved.name,
            alternates: resolved.alternates,
        }
    }
}

/// Successful topic listing or topic search.
#[derive(Debug, Serialize)]
pub struct TopicListEnvelope {
    pub success: bool,
    pub total: usize,
    pub topics: Vec<TopicEntry>,
}

impl TopicListEnvelope {
    #[must_use]
    pub fn new(topics: Vec<TopicEntry>) -> Self {
        Self {
            success: true,
            total: topics.len(),
            topics,
        }
    }
}

/// Static description of the standards table and its project.
#[derive(Debug, Serialize)]
pub struct TableInfoEnvelope {
    pub success: bool,
    pub table_id: String,
    pub table_name: String,
    pub project_id: String,
    pub project_name: String,
    pub description: String,
    pub synapse_url: String,
    pub project_url: String,
}

impl TableInfoEnvelope {
    #[must_use]
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            success: true,
            table_id: config.table_id.clone(),
            table_name: "Bridge2AI Standards Explorer Table".to_string(),
            project_id: config.project_id.clone(),
            project_name: "Bridge2AI Standards Explorer".to_string(),
            description:
                "Standards and data-sharing specifications curated for Bridge2AI, classified by data topic."
                    .to_string(),
            synapse_url: format!("https://www.synapse.org/#!Synapse:{}", config.table_id),
            project_url: format!("https://www.synapse.org/#!Synapse:{}", config.project_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn failure_envelopes_always_carry_a_nonempty_error() {
        let errors = vec![
            ExplorerError::Synapse(SynapseError::Http {
                status: 500,
                body: "server error".to_string(),
            }),
            ExplorerError::Synapse(SynapseError::Request("connection refused".to_string())),
            ExplorerError::Synapse(SynapseError::Timeout {
                max_wait: Duration::from_secs(30),
            }),
            ExplorerError::Synapse(SynapseError::MissingToken),
            ExplorerError::Synapse(SynapseError::AuthRequired { status: 401 }),
            ExplorerError::TopicNotFound {
                topic: "nope".to_string(),
                known: vec!["B2AI_TOPIC:1".to_string()],
            },
        ];
        for err in &errors {
            let failure = Failure::from_error(err);
            let value = serde_json::to_value(&failure).expect("failure should serialize");
            assert_eq!(value["success"], false);
            assert!(
                !value["error"].as_str().expect("error string").is_empty(),
                "error for {err} should not be empty"
            );
        }
    }

    #[test]
    fn http_failure_carries_body_as_details() {
        let err = ExplorerError::Synapse(SynapseError::Http {
            status: 503,
            body: "maintenance".to_string(),
        });
        let failure = Failure::from_error(&err);
        assert_eq!(failure.error, "HTTP error occurred: 503");
        assert_eq!(failure.details.as_deref(), Some("maintenance"));
    }

    #[test]
    fn topic_not_found_exposes_suggestions() {
        let err = ExplorerError::TopicNotFound {
            topic: "gnomics".to_string(),
            known: vec!["B2AI_TOPIC:1".to_string(), "B2AI_TOPIC:2".to_string()],
        };
        let failure = Failure::from_error(&err);
        let value = serde_json::to_value(&failure).expect("failure should serialize");
        assert_eq!(value["known_topics"].as_array().expect("array").len(), 2);
    }

    #[test]
    fn auth_failure_names_the_token_variable() {
        let err = ExplorerError::Synapse(SynapseError::AuthRequired { status: 403 });
        let failure = Failure::from_error(&err);
        assert!(failure.error.contains("SYNAPSE_AUTH_TOKEN"));
    }

    #[test]
    fn query_envelope_reports_success_and_counts() {
        let output = QueryOutput::default();
        let envelope = QueryEnvelope::new("SELECT * FROM syn123", output);
        let value = serde_json::to_value(&envelope).expect("envelope should serialize");
        assert_eq!(value["success"], true);
        assert_eq!(value["total_results"], 0);
        assert_eq!(value["returned_results"], 0);
    }
}
