//! Transport seam between the job poller and the Synapse REST API.
//!
//! The trait keeps the poller testable against an in-memory fake; the
//! reqwest-backed implementation talks to a live endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{SynapseError, SynapseResult};
use crate::wire::{JobSubmitted, QueryBundleRequest, QueryResultBundle};

/// Outcome of one job-status fetch.
#[derive(Debug, Clone)]
pub enum JobState {
    /// HTTP 202: the job is still running.
    Processing,
    /// The job finished and returned a result bundle.
    Ready(QueryResultBundle),
}

#[async_trait]
pub trait SynapseTransport: Send + Sync {
    /// Starts an asynchronous table query job.
    ///
    /// # Errors
    /// Returns `SynapseError` on transport failure or a non-success status.
    async fn start_query(
        &self,
        table_id: &str,
        request: &QueryBundleRequest,
    ) -> SynapseResult<JobSubmitted>;

    /// Fetches the status or result of a previously started job.
    ///
    /// # Errors
    /// Returns `SynapseError` on transport failure, a non-success status, or
    /// an undecodable result body.
    async fn fetch_job(&self, table_id: &str, token: &str) -> SynapseResult<JobState>;
}

/// reqwest-backed transport against a live Synapse endpoint.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpTransport {
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            auth_token: auth_token.filter(|token| !token.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry an Authorization header.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth_token.is_some()
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl SynapseTransport for HttpTransport {
    async fn start_query(
        &self,
        table_id: &str,
        request: &QueryBundleRequest,
    ) -> SynapseResult<JobSubmitted> {
        let url = format!(
            "{}/repo/v1/entity/{table_id}/table/query/async/start",
            self.base_url
        );
        let response = self
            .apply_auth(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(map_transport_err)?;
        if !response.status().is_success() {
            return Err(fail_for_status(response).await);
        }
        response
            .json()
            .await
            .map_err(|err| SynapseError::Decode(err.to_string()))
    }

    async fn fetch_job(&self, table_id: &str, token: &str) -> SynapseResult<JobState> {
        let url = format!(
            "{}/repo/v1/entity/{table_id}/table/query/async/get/{token}",
            self.base_url
        );
        let response = self
            .apply_auth(self.client.get(&url))
            .send()
            .await
            .map_err(map_transport_err)?;
        let status = response.status();
        if status == StatusCode::ACCEPTED {
            return Ok(JobState::Processing);
        }
        if !status.is_success() {
            return Err(fail_for_status(response).await);
        }
        let bundle = response
            .json()
            .await
            .map_err(|err| SynapseError::Decode(err.to_string()))?;
        Ok(JobState::Ready(bundle))
    }
}

fn map_transport_err(err: reqwest::Error) -> SynapseError {
    SynapseError::Request(err.to_string())
}

async fn fail_for_status(response: reqwest::Response) -> SynapseError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return SynapseError::AuthRequired {
            status: status.as_u16(),
        };
    }
    let body = response.text().await.unwrap_or_default();
    SynapseError::Http {
        status: status.as_u16(),
        body,
    }
}
