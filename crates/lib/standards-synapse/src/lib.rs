//! Synapse table-service client for standards-mcp.
//!
//! Synapse executes table SQL as asynchronous jobs: a submit call returns a
//! token immediately and a status endpoint answers 202 until the result
//! bundle is ready. This crate owns the wire types for that protocol, the
//! transport seam, and the polling engine shared by every query path.

pub mod error;
pub mod poller;
pub mod transport;
pub mod wire;

pub use error::{SynapseError, SynapseResult};
pub use poller::{CancelReceiver, JobHandle, JobPoller, PollConfig, cancel_channel};
pub use transport::{HttpTransport, JobState, SynapseTransport};
pub use wire::{QueryBundleRequest, QueryResultBundle, SelectColumn, TableRow};
