use std::collections::HashSet;

use tracing::debug;

use standards_synapse::{SelectColumn, SynapseTransport};

use super::{ExplorerResult, QueryOutput, StandardsExplorer};
use crate::sql;
use crate::topics::ResolvedTopic;

/// Result of a single-term search, with the topic that widened it (if any).
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub output: QueryOutput,
    pub matched_topic: Option<ResolvedTopic>,
}

/// One deduplicated row of a multi-term aggregation. `matched_term` is the
/// first term (in search order) whose query produced the row.
#[derive(Debug, Clone)]
pub struct AggregatedHit {
    pub values: Vec<Option<String>>,
    pub matched_term: String,
    pub is_original_term: bool,
}

/// Combined result of searching a list of term variations.
#[derive(Debug, Clone, Default)]
pub struct AggregatedSearch {
    pub hits: Vec<AggregatedHit>,
    pub columns: Vec<SelectColumn>,
    pub terms: Vec<String>,
}

impl<T: SynapseTransport> StandardsExplorer<T> {
    /// Searches the table for one term.
    ///
    /// With `topic_aware`, the term is first resolved against the topics
    /// table; a successful resolution ORs the topic id into the WHERE clause
    /// and is reported on the outcome. Any resolution failure downgrades to a
    /// plain search.
    ///
    /// # Errors
    /// Returns `ExplorerError` if the search query itself fails.
    pub async fn search_one(
        &self,
        term: &str,
        limit: usize,
        offset: usize,
        topic_aware: bool,
    ) -> ExplorerResult<SearchOutcome> {
        let matched_topic = if topic_aware {
            match self.resolver().resolve(term).await {
                Ok(resolved) => Some(resolved),
                Err(err) => {
                    debug!(term, error = %err, "topic resolution skipped");
                    None
                }
            }
        } else {
            None
        };
        let statement = sql::build_search_sql(
            &self.config().table_id,
            &self.config().search_columns,
            term,
            limit,
            offset,
            &self.config().topic_column,
            matched_topic.as_ref().map(|topic| topic.id.as_str()),
        );
        let bundle = self
            .poller()
            .execute(&self.config().table_id, &statement, None)
            .await?;
        Ok(SearchOutcome {
            output: bundle.into(),
            matched_topic,
        })
    }

    /// Searches every term in caller order and folds the rows into one
    /// aggregate, deduplicated by the record identifier at value position 0.
    /// The first term to produce an identifier fixes its `matched_term`.
    ///
    /// A term whose query fails contributes nothing; partial results are
    /// preferred over total failure. Column metadata comes from a best-effort
    /// follow-up single-row query against `primary`, skipped entirely when no
    /// rows were found.
    pub async fn search_variations(
        &self,
        primary: &str,
        terms: &[String],
        per_term_limit: usize,
    ) -> AggregatedSearch {
        let mut hits: Vec<AggregatedHit> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for term in terms {
            match self.search_one(term, per_term_limit, 0, false).await {
                Ok(outcome) => {
                    for row in outcome.output.rows {
                        let key = row.key().unwrap_or_default().to_string();
                        if seen.insert(key) {
                            hits.push(AggregatedHit {
                                values: row.values,
                                matched_term: term.clone(),
                                is_original_term: term == primary,
                            });
                        }
                    }
                }
                Err(err) => {
                    debug!(term, error = %err, "variation query failed; skipping term");
                }
            }
        }

        let columns = if hits.is_empty() {
            Vec::new()
        } else {
            match self.search_one(primary, 1, 0, false).await {
                Ok(outcome) => outcome.output.columns,
                Err(err) => {
                    debug!(error = %err, "column metadata follow-up failed");
                    Vec::new()
                }
            }
        };

        AggregatedSearch {
            hits,
            columns,
            terms: terms.to_vec(),
        }
    }
}
