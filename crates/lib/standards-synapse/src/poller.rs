//! Asynchronous job submission and polling.
//!
//! Submitting a query returns a [`JobHandle`]; polling fetches the job status
//! until the service stops answering 202. Only elapsed wall-clock time bounds
//! the loop, so the poll interval sets a soft upper bound on attempt count.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::{SynapseError, SynapseResult};
use crate::transport::{JobState, SynapseTransport};
use crate::wire::{QueryBundleRequest, QueryResultBundle};

/// Receiver half of a poll-cancellation signal.
pub type CancelReceiver = watch::Receiver<bool>;

/// Creates a linked cancellation sender/receiver pair. Send `true` to stop
/// any poll loop holding the receiver.
#[must_use]
pub fn cancel_channel() -> (watch::Sender<bool>, CancelReceiver) {
    watch::channel(false)
}

/// Timing knobs for the poll loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl PollConfig {
    #[must_use]
    pub const fn new(max_wait: Duration) -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_wait,
        }
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// One in-flight asynchronous query. Valid for a single poll sequence.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub table_id: String,
    pub token: String,
}

/// Submits table queries as asynchronous jobs and polls them to completion.
pub struct JobPoller<T> {
    transport: Arc<T>,
    config: PollConfig,
}

impl<T> Clone for JobPoller<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T: SynapseTransport> JobPoller<T> {
    #[must_use]
    pub const fn new(transport: Arc<T>, config: PollConfig) -> Self {
        Self { transport, config }
    }

    #[must_use]
    pub const fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Starts a query job and returns its handle.
    ///
    /// # Errors
    /// Returns `SynapseError` if the transport fails, the service answers
    /// with a non-success status, or the accepted job carries no token.
    pub async fn submit(&self, table_id: &str, sql: &str) -> SynapseResult<JobHandle> {
        let request = QueryBundleRequest::new(table_id, sql);
        let submitted = self.transport.start_query(table_id, &request).await?;
        let token = submitted
            .token
            .filter(|token| !token.is_empty())
            .ok_or(SynapseError::MissingToken)?;
        debug!(table_id, "table query job started");
        Ok(JobHandle {
            table_id: table_id.to_string(),
            token,
        })
    }

    /// Polls a job until it completes, times out, or is cancelled.
    ///
    /// # Errors
    /// Returns `SynapseError::Timeout` once elapsed time since the first
    /// fetch reaches the configured bound, `SynapseError::Cancelled` when the
    /// cancel signal fires, and any terminal transport or status error as-is.
    pub async fn poll(
        &self,
        handle: &JobHandle,
        cancel: Option<&CancelReceiver>,
    ) -> SynapseResult<QueryResultBundle> {
        let mut cancel = cancel.cloned();
        let started = Instant::now();
        let mut attempts: u32 = 0;
        loop {
            if let Some(rx) = &cancel {
                if *rx.borrow() {
                    return Err(SynapseError::Cancelled);
                }
            }
            attempts += 1;
            match self
                .transport
                .fetch_job(&handle.table_id, &handle.token)
                .await?
            {
                JobState::Ready(bundle) => {
                    debug!(table_id = %handle.table_id, attempts, "table query job completed");
                    return Ok(bundle);
                }
                JobState::Processing => {}
            }
            if started.elapsed() >= self.config.max_wait {
                return Err(SynapseError::Timeout {
                    max_wait: self.config.max_wait,
                });
            }
            match cancel.as_mut() {
                Some(rx) => {
                    tokio::select! {
                        () = sleep(self.config.poll_interval) => {}
                        _ = rx.changed() => {}
                    }
                }
                None => sleep(self.config.poll_interval).await,
            }
        }
    }

    /// Submits a query and polls it to completion in one step.
    ///
    /// # Errors
    /// Propagates any `submit` or `poll` error.
    pub async fn execute(
        &self,
        table_id: &str,
        sql: &str,
        cancel: Option<&CancelReceiver>,
    ) -> SynapseResult<QueryResultBundle> {
        let handle = self.submit(table_id, sql).await?;
        self.poll(&handle, cancel).await
    }
}
