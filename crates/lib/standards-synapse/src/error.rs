use std::{error::Error, fmt, time::Duration};

/// Errors produced while talking to the Synapse table service.
#[derive(Debug)]
pub enum SynapseError {
    /// Remote service answered with a non-success status.
    Http { status: u16, body: String },
    /// Remote service rejected the request for lack of credentials.
    AuthRequired { status: u16 },
    /// Transport failed before any response was received.
    Request(String),
    /// Job submission was accepted without returning an async token.
    MissingToken,
    /// A response body could not be decoded as the expected shape.
    Decode(String),
    /// The poll loop exceeded its configured wall-clock bound.
    Timeout { max_wait: Duration },
    /// Polling was abandoned through the cancellation signal.
    Cancelled,
}

impl fmt::Display for SynapseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { status, .. } => write!(f, "HTTP error occurred: {status}"),
            Self::AuthRequired { status } => write!(
                f,
                "authentication required (HTTP {status}): set SYNAPSE_AUTH_TOKEN to a Synapse personal access token"
            ),
            Self::Request(message) => write!(f, "request error occurred: {message}"),
            Self::MissingToken => write!(f, "job submission returned no async token"),
            Self::Decode(message) => write!(f, "failed to decode response: {message}"),
            Self::Timeout { max_wait } => {
                write!(f, "query timed out after {} seconds", max_wait.as_secs())
            }
            Self::Cancelled => write!(f, "query polling was cancelled"),
        }
    }
}

impl Error for SynapseError {}

pub type SynapseResult<T> = Result<T, SynapseError>;
