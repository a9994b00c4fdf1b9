use std::{error::Error, fmt, sync::Arc};

use standards_synapse::{JobPoller, PollConfig, SynapseError, SynapseTransport};

use crate::topics::TopicResolver;

pub mod query;
pub mod search;
pub mod topics;

pub use query::QueryOutput;
pub use search::{AggregatedHit, AggregatedSearch, SearchOutcome};

#[derive(Debug)]
pub enum ExplorerError {
    Synapse(SynapseError),
    TopicNotFound { topic: String, known: Vec<String> },
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synapse(err) => write!(f, "{err}"),
            Self::TopicNotFound { topic, .. } => write!(f, "no topic matches '{topic}'"),
        }
    }
}

impl Error for ExplorerError {}

impl From<SynapseError> for ExplorerError {
    fn from(err: SynapseError) -> Self {
        Self::Synapse(err)
    }
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Table identifiers and search behavior for one explorer instance.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub table_id: String,
    pub topics_table_id: String,
    pub project_id: String,
    pub search_columns: Vec<String>,
    pub topic_column: String,
}

impl ExplorerConfig {
    #[must_use]
    pub fn new(table_id: impl Into<String>, topics_table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            topics_table_id: topics_table_id.into(),
            project_id: String::new(),
            search_columns: vec!["name".to_string(), "description".to_string()],
            topic_column: "concerns_data_topic".to_string(),
        }
    }

    #[must_use]
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    #[must_use]
    pub fn with_search_columns(mut self, search_columns: Vec<String>) -> Self {
        self.search_columns = search_columns;
        self
    }

    #[must_use]
    pub fn with_topic_column(mut self, topic_column: impl Into<String>) -> Self {
        self.topic_column = topic_column.into();
        self
    }
}

/// Control plane for the standards table: raw queries, topic-aware search,
/// and topic resolution, all driven through one job poller.
pub struct StandardsExplorer<T> {
    poller: JobPoller<T>,
    resolver: TopicResolver<T>,
    config: ExplorerConfig,
}

impl<T: SynapseTransport> StandardsExplorer<T> {
    #[must_use]
    pub fn new(transport: Arc<T>, poll: PollConfig, config: ExplorerConfig) -> Self {
        let poller = JobPoller::new(transport, poll);
        let resolver = TopicResolver::new(poller.clone(), config.topics_table_id.clone());
        Self {
            poller,
            resolver,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    #[must_use]
    pub const fn resolver(&self) -> &TopicResolver<T> {
        &self.resolver
    }

    pub(crate) const fn poller(&self) -> &JobPoller<T> {
        &self.poller
    }
}
