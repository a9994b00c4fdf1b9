use standards_synapse::{QueryResultBundle, SelectColumn, SynapseTransport, TableRow};

use super::{ExplorerResult, StandardsExplorer};

/// Simplified view of one completed table query.
#[derive(Debug, Clone, Default)]
pub struct QueryOutput {
    pub rows: Vec<TableRow>,
    pub columns: Vec<SelectColumn>,
    pub total: Option<i64>,
}

impl QueryOutput {
    #[must_use]
    pub fn returned(&self) -> usize {
        self.rows.len()
    }

    /// Total matching rows when the service reported a count, else the
    /// number of rows returned.
    #[must_use]
    pub fn total_or_returned(&self) -> i64 {
        self.total
            .unwrap_or_else(|| i64::try_from(self.rows.len()).unwrap_or(i64::MAX))
    }
}

impl From<QueryResultBundle> for QueryOutput {
    fn from(bundle: QueryResultBundle) -> Self {
        let rows = bundle
            .query_result
            .and_then(|part| part.query_results)
            .map(|set| set.rows)
            .unwrap_or_default();
        Self {
            rows,
            columns: bundle.select_columns,
            total: bundle.query_count,
        }
    }
}

impl<T: SynapseTransport> StandardsExplorer<T> {
    /// Runs a caller-supplied SQL statement through the async job engine.
    ///
    /// # Errors
    /// Returns `ExplorerError` if submission or polling fails.
    pub async fn run_sql(&self, sql: &str) -> ExplorerResult<QueryOutput> {
        let bundle = self
            .poller()
            .execute(&self.config().table_id, sql, None)
            .await?;
        Ok(bundle.into())
    }
}
