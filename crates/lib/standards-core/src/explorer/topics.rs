use standards_synapse::SynapseTransport;

use super::{ExplorerResult, StandardsExplorer};
use crate::topics::{ResolvedTopic, TopicEntry};

impl<T: SynapseTransport> StandardsExplorer<T> {
    /// Resolves a topic name to its identifier.
    ///
    /// # Errors
    /// Returns `ExplorerError::TopicNotFound` when no exact or substring
    /// match exists.
    pub async fn resolve_topic(&self, name: &str) -> ExplorerResult<ResolvedTopic> {
        self.resolver().resolve(name).await
    }

    /// Lists every topic in the lookup table.
    ///
    /// # Errors
    /// Propagates a topics-table load failure.
    pub async fn list_topics(&self) -> ExplorerResult<Vec<TopicEntry>> {
        self.resolver().load_all().await
    }

    /// Searches topics by name or description substring.
    ///
    /// # Errors
    /// Propagates a topics-table load failure.
    pub async fn search_topics(&self, text: &str) -> ExplorerResult<Vec<TopicEntry>> {
        self.resolver().search_by_text(text).await
    }

    /// Drops the cached topics table; the next topic operation reloads it.
    pub async fn invalidate_topics(&self) {
        self.resolver().invalidate().await;
    }
}
