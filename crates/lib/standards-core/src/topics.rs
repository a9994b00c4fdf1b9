//! Topic-name resolution against the topics lookup table.
//!
//! The full topics table is loaded once through the job poller and cached for
//! the life of the resolver. Resolution tries an exact case-insensitive match
//! first, then falls back to bidirectional substring containment with a
//! deterministic tie-break.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::warn;

use standards_synapse::{JobPoller, SynapseTransport};

use crate::explorer::{ExplorerError, ExplorerResult};
use crate::sql;

/// One row of the topics lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicEntry {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A topic name resolved to its identifier. `alternates` holds the full
/// candidate set whenever the match came from the substring fallback, so
/// ambiguity stays visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTopic {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<TopicEntry>,
}

#[derive(Debug, Default)]
struct TopicCache {
    ids_by_name: HashMap<String, String>,
    entries: Vec<TopicEntry>,
}

impl TopicCache {
    fn from_entries(entries: Vec<TopicEntry>) -> Self {
        let mut ids_by_name = HashMap::new();
        for entry in &entries {
            ids_by_name.insert(entry.name.clone(), entry.id.clone());
            ids_by_name.insert(entry.name.to_lowercase(), entry.id.clone());
        }
        Self {
            ids_by_name,
            entries,
        }
    }

    fn known_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.iter().map(|entry| entry.id.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// Lazily loads and caches the topics table, resolving names to ids.
pub struct TopicResolver<T> {
    poller: JobPoller<T>,
    table_id: String,
    cache: RwLock<Option<Arc<TopicCache>>>,
}

impl<T: SynapseTransport> TopicResolver<T> {
    #[must_use]
    pub fn new(poller: JobPoller<T>, table_id: impl Into<String>) -> Self {
        Self {
            poller,
            table_id: table_id.into(),
            cache: RwLock::new(None),
        }
    }

    /// Drops the cached topic table so the next call reloads it.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    /// Resolves a topic name to its identifier.
    ///
    /// Exact case-insensitive matches win. Otherwise all entries whose name
    /// contains the query (or vice versa, case-insensitively) become
    /// candidates; the shortest name wins, lexicographic order breaks ties,
    /// and the full candidate set is returned as alternates.
    ///
    /// # Errors
    /// Returns `ExplorerError::TopicNotFound` carrying all known topic ids
    /// when neither match strategy produces a candidate.
    pub async fn resolve(&self, name: &str) -> ExplorerResult<ResolvedTopic> {
        let cache = self.cached_or_empty().await;
        let query = name.trim();

        let exact = cache
            .ids_by_name
            .get(query)
            .or_else(|| cache.ids_by_name.get(query.to_lowercase().as_str()));
        if let Some(id) = exact {
            let name = cache
                .entries
                .iter()
                .find(|entry| &entry.id == id)
                .map_or_else(|| query.to_string(), |entry| entry.name.clone());
            return Ok(ResolvedTopic {
                id: id.clone(),
                name,
                alternates: Vec::new(),
            });
        }

        let lowered = query.to_lowercase();
        let mut candidates: Vec<&TopicEntry> = cache
            .entries
            .iter()
            .filter(|entry| {
                let candidate = entry.name.to_lowercase();
                candidate.contains(&lowered) || lowered.contains(&candidate)
            })
            .collect();
        if candidates.is_empty() {
            return Err(ExplorerError::TopicNotFound {
                topic: query.to_string(),
                known: cache.known_ids(),
            });
        }
        candidates.sort_by(|a, b| {
            a.name
                .len()
                .cmp(&b.name.len())
                .then_with(|| a.name.cmp(&b.name))
        });
        let chosen = candidates[0];
        Ok(ResolvedTopic {
            id: chosen.id.clone(),
            name: chosen.name.clone(),
            alternates: candidates.into_iter().cloned().collect(),
        })
    }

    /// Returns every topic entry, loading the table on first use.
    ///
    /// # Errors
    /// Unlike `resolve`, a load failure propagates so callers can surface it.
    pub async fn load_all(&self) -> ExplorerResult<Vec<TopicEntry>> {
        let cache = self.ensure_loaded().await?;
        Ok(cache.entries.clone())
    }

    /// Topics whose name or description contains `text`, case-insensitively.
    ///
    /// # Errors
    /// Propagates a topics-table load failure.
    pub async fn search_by_text(&self, text: &str) -> ExplorerResult<Vec<TopicEntry>> {
        let cache = self.ensure_loaded().await?;
        let needle = text.to_lowercase();
        Ok(cache
            .entries
            .iter()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&needle)
                    || entry
                        .description
                        .as_ref()
                        .is_some_and(|description| description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    /// Cached table, or a populated one after a successful load. A load
    /// failure is never cached: the next call re-attempts it.
    async fn ensure_loaded(&self) -> ExplorerResult<Arc<TopicCache>> {
        if let Some(cache) = self.cache.read().await.as_ref() {
            return Ok(cache.clone());
        }
        let loaded = Arc::new(self.load().await?);
        // Concurrent first loads race benignly: the table contents are the
        // same, so the last writer stores an equivalent map.
        *self.cache.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    async fn cached_or_empty(&self) -> Arc<TopicCache> {
        match self.ensure_loaded().await {
            Ok(cache) => cache,
            Err(err) => {
                warn!(error = %err, table_id = %self.table_id, "failed to load topics table; resolving against an empty set");
                Arc::new(TopicCache::default())
            }
        }
    }

    async fn load(&self) -> ExplorerResult<TopicCache> {
        let statement = sql::build_topics_sql(&self.table_id);
        let bundle = self.poller.execute(&self.table_id, &statement, None).await?;
        let mut entries = Vec::new();
        for row in bundle.rows() {
            let id = row.values.first().cloned().flatten();
            let name = row.values.get(1).cloned().flatten();
            let (Some(id), Some(name)) = (id, name) else {
                continue;
            };
            let description = row.values.get(2).cloned().flatten();
            entries.push(TopicEntry {
                id,
                name,
                description,
            });
        }
        Ok(TopicCache::from_entries(entries))
    }
}
