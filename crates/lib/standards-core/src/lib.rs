//! Core search and query services for standards-mcp.
//!
//! This crate owns the explorer control plane: SQL assembly for table
//! searches, the topic-name resolution cache, the multi-term search
//! aggregator, and the uniform envelopes every tool-facing operation returns.

pub mod envelope;
pub mod explorer;
pub mod sql;
pub mod topics;

pub use explorer::{ExplorerConfig, ExplorerError, ExplorerResult, StandardsExplorer};
pub use topics::{ResolvedTopic, TopicEntry, TopicResolver};
