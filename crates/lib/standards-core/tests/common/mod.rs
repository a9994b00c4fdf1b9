#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use standards_core::explorer::{ExplorerConfig, StandardsExplorer};
use standards_synapse::wire::{JobSubmitted, QueryResultPart, RowSet};
use standards_synapse::{
    JobState, PollConfig, QueryBundleRequest, QueryResultBundle, SelectColumn, SynapseError,
    SynapseResult, SynapseTransport, TableRow,
};

/// In-memory transport that records submitted SQL and answers each job with
/// the next scripted response. Jobs with no scripted response complete with
/// an empty bundle.
pub struct FakeSynapse {
    responses: Mutex<VecDeque<SynapseResult<QueryResultBundle>>>,
    submitted: Mutex<Vec<String>>,
    tokens: AtomicUsize,
}

impl FakeSynapse {
    pub fn new(responses: Vec<SynapseResult<QueryResultBundle>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            submitted: Mutex::new(Vec::new()),
            tokens: AtomicUsize::new(0),
        })
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().expect("lock").clone()
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().expect("lock").len()
    }
}

#[async_trait]
impl SynapseTransport for FakeSynapse {
    async fn start_query(
        &self,
        _table_id: &str,
        request: &QueryBundleRequest,
    ) -> SynapseResult<JobSubmitted> {
        self.submitted
            .lock()
            .expect("lock")
            .push(request.query.sql.clone());
        let n = self.tokens.fetch_add(1, Ordering::SeqCst);
        Ok(JobSubmitted {
            token: Some(format!("tok-{n}")),
        })
    }

    async fn fetch_job(&self, _table_id: &str, _token: &str) -> SynapseResult<JobState> {
        match self.responses.lock().expect("lock").pop_front() {
            Some(Ok(bundle)) => Ok(JobState::Ready(bundle)),
            Some(Err(err)) => Err(err),
            None => Ok(JobState::Ready(QueryResultBundle::default())),
        }
    }
}

pub fn explorer_with(transport: Arc<FakeSynapse>) -> StandardsExplorer<FakeSynapse> {
    let poll =
        PollConfig::new(Duration::from_secs(5)).with_poll_interval(Duration::from_millis(1));
    let config = ExplorerConfig::new("syn100", "syn200").with_project_id("syn1");
    StandardsExplorer::new(transport, poll, config)
}

pub fn row(values: &[Option<&str>]) -> TableRow {
    TableRow {
        row_id: None,
        version_number: None,
        values: values.iter().map(|value| value.map(str::to_string)).collect(),
    }
}

pub fn bundle(rows: Vec<TableRow>, columns: &[&str]) -> QueryResultBundle {
    QueryResultBundle {
        query_result: Some(QueryResultPart {
            query_results: Some(RowSet {
                table_id: None,
                rows,
            }),
        }),
        query_count: None,
        select_columns: columns
            .iter()
            .map(|name| SelectColumn {
                id: None,
                name: (*name).to_string(),
                column_type: Some("STRING".to_string()),
            })
            .collect(),
    }
}

pub fn topics_bundle(entries: &[(&str, &str, Option<&str>)]) -> QueryResultBundle {
    let rows = entries
        .iter()
        .map(|(id, name, description)| row(&[Some(id), Some(name), *description]))
        .collect();
    bundle(rows, &["id", "name", "description"])
}

pub fn http_error(status: u16) -> SynapseError {
    SynapseError::Http {
        status,
        body: "scripted failure".to_string(),
    }
}
