use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://repo-prod.prod.sagebase.org";
const DEFAULT_TABLE_ID: &str = "syn63096833";
const DEFAULT_TOPICS_TABLE_ID: &str = "syn63096835";
const DEFAULT_PROJECT_ID: &str = "syn63096806";
const DEFAULT_SEARCH_COLUMNS: &str = "name,description";
const DEFAULT_TOPIC_COLUMN: &str = "concerns_data_topic";
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";

#[derive(Parser, Debug)]
#[command(name = "standards-mcpd", version, about = "Standards MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "SYNAPSE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "SYNAPSE_TABLE_ID", default_value = DEFAULT_TABLE_ID)]
    table_id: String,

    #[arg(
        long,
        env = "SYNAPSE_TOPICS_TABLE_ID",
        default_value = DEFAULT_TOPICS_TABLE_ID
    )]
    topics_table_id: String,

    #[arg(long, env = "SYNAPSE_PROJECT_ID", default_value = DEFAULT_PROJECT_ID)]
    project_id: String,

    #[arg(long, env = "SYNAPSE_AUTH_TOKEN")]
    auth_token: Option<String>,

    #[arg(
        long,
        env = "STANDARDS_SEARCH_COLUMNS",
        default_value = DEFAULT_SEARCH_COLUMNS
    )]
    search_columns: String,

    #[arg(
        long,
        env = "STANDARDS_TOPIC_COLUMN",
        default_value = DEFAULT_TOPIC_COLUMN
    )]
    topic_column: String,

    #[arg(
        long,
        env = "STANDARDS_QUERY_TIMEOUT_SECS",
        default_value_t = DEFAULT_QUERY_TIMEOUT_SECS
    )]
    query_timeout_secs: u64,

    #[arg(
        long,
        env = "STANDARDS_POLL_INTERVAL_MS",
        default_value_t = DEFAULT_POLL_INTERVAL_MS
    )]
    poll_interval_ms: u64,

    #[arg(
        long = "stdio",
        env = "STANDARDS_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "STANDARDS_MCP_HTTP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http_serve: bool,

    #[arg(long, env = "STANDARDS_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct StandardsConfig {
    pub base_url: String,
    pub table_id: String,
    pub topics_table_id: String,
    pub project_id: String,
    pub auth_token: Option<String>,
    pub search_columns: Vec<String>,
    pub topic_column: String,
    pub query_timeout: Duration,
    pub poll_interval: Duration,
    pub enable_stdio: bool,
    pub http_serve: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl StandardsConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for StandardsConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "SYNAPSE_BASE_URL",
                value: args.base_url,
            });
        }
        if args.table_id.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "SYNAPSE_TABLE_ID",
                value: args.table_id,
            });
        }
        if args.topics_table_id.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "SYNAPSE_TOPICS_TABLE_ID",
                value: args.topics_table_id,
            });
        }
        if args.query_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "STANDARDS_QUERY_TIMEOUT_SECS",
                value: args.query_timeout_secs.to_string(),
            });
        }
        if args.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "STANDARDS_POLL_INTERVAL_MS",
                value: args.poll_interval_ms.to_string(),
            });
        }

        let search_columns: Vec<String> = args
            .search_columns
            .split(',')
            .map(str::trim)
            .filter(|column| !column.is_empty())
            .map(str::to_string)
            .collect();
        if search_columns.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "STANDARDS_SEARCH_COLUMNS",
                value: args.search_columns,
            });
        }

        let auth_token = args.auth_token.filter(|token| !token.trim().is_empty());

        Ok(Self {
            base_url: args.base_url,
            table_id: args.table_id,
            topics_table_id: args.topics_table_id,
            project_id: args.project_id,
            auth_token,
            search_columns,
            topic_column: args.topic_column,
            query_timeout: Duration::from_secs(args.query_timeout_secs),
            poll_interval: Duration::from_millis(args.poll_interval_ms),
            enable_stdio: args.enable_stdio,
            http_serve: args.http_serve,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            base_url: DEFAULT_BASE_URL.to_string(),
            table_id: DEFAULT_TABLE_ID.to_string(),
            topics_table_id: DEFAULT_TOPICS_TABLE_ID.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            auth_token: None,
            search_columns: DEFAULT_SEARCH_COLUMNS.to_string(),
            topic_column: DEFAULT_TOPIC_COLUMN.to_string(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            enable_stdio: true,
            http_serve: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
        }
    }

    #[test]
    fn parses_search_columns_from_comma_list() {
        let mut args = base_args();
        args.search_columns = "name, description , acronym".to_string();

        let config = StandardsConfig::try_from(args).expect("config should parse");

        assert_eq!(config.search_columns, vec!["name", "description", "acronym"]);
    }

    #[test]
    fn rejects_a_zero_query_timeout() {
        let mut args = base_args();
        args.query_timeout_secs = 0;

        let err = StandardsConfig::try_from(args).expect_err("config should be rejected");

        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "STANDARDS_QUERY_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn blank_auth_token_is_treated_as_absent() {
        let mut args = base_args();
        args.auth_token = Some("   ".to_string());

        let config = StandardsConfig::try_from(args).expect("config should parse");

        assert!(config.auth_token.is_none());
    }

    #[test]
    fn rejects_an_empty_column_list() {
        let mut args = base_args();
        args.search_columns = " , ,".to_string();

        let err = StandardsConfig::try_from(args).expect_err("config should be rejected");

        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "STANDARDS_SEARCH_COLUMNS",
                ..
            }
        ));
    }
}
