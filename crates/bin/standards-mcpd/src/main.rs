//! Daemon entry point for the standards MCP server.
//!
//! Loads configuration from the environment, builds the Synapse transport and
//! explorer, and serves the MCP protocol over stdio and/or streamable HTTP.

mod config;

use std::sync::Arc;

use standards_core::explorer::{ExplorerConfig, StandardsExplorer};
use standards_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use standards_synapse::{HttpTransport, PollConfig};
use tracing::{error, info};

use crate::config::StandardsConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = StandardsConfig::from_args()?;

    // Logs must stay off stdout: the stdio transport owns it.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "standards_mcpd=info,standards_mcp=info,standards_core=info,standards_synapse=info",
                )
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let transport = Arc::new(HttpTransport::new(
        &config.base_url,
        config.auth_token.clone(),
    ));
    let poll = PollConfig::new(config.query_timeout).with_poll_interval(config.poll_interval);
    let explorer_config = ExplorerConfig::new(&config.table_id, &config.topics_table_id)
        .with_project_id(&config.project_id)
        .with_search_columns(config.search_columns.clone())
        .with_topic_column(&config.topic_column);
    let explorer = Arc::new(StandardsExplorer::new(transport, poll, explorer_config));

    if config.http_serve {
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        if config.enable_stdio {
            let http_explorer = explorer.clone();
            tokio::spawn(async move {
                if let Err(err) = serve_streamable_http(http_explorer, http_config).await {
                    error!(error = %err, "streamable HTTP server exited");
                }
            });
        } else {
            info!(addr = %config.mcp_http_addr, "serving MCP over streamable HTTP");
            serve_streamable_http(explorer, http_config).await?;
            return Ok(());
        }
    }

    info!(table_id = %config.table_id, "serving MCP over stdio");
    serve_stdio(explorer).await?;
    Ok(())
}
