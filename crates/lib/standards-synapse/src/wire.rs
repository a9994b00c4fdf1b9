//! Wire types for the Synapse asynchronous table-query protocol.
//!
//! Field names and the part mask must match the remote service exactly; the
//! structs here mirror the JSON bodies of the job-start and job-result
//! endpoints.

use serde::{Deserialize, Serialize};

pub const CONCRETE_TYPE_QUERY_BUNDLE: &str =
    "org.sagebionetworks.repo.model.table.QueryBundleRequest";

/// Part-mask bits selecting which sections of the result bundle to return.
pub const PART_QUERY_RESULTS: u64 = 0x1;
pub const PART_QUERY_COUNT: u64 = 0x2;
pub const PART_SELECT_COLUMNS: u64 = 0x4;
pub const PART_COLUMN_MODELS: u64 = 0x10;

/// Rows, selected-column metadata, and column models.
pub const DEFAULT_PART_MASK: u64 = PART_QUERY_RESULTS | PART_SELECT_COLUMNS | PART_COLUMN_MODELS;

/// Body of the job-start request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBundleRequest {
    pub concrete_type: String,
    pub entity_id: String,
    pub query: TableQuery,
    pub part_mask: u64,
}

impl QueryBundleRequest {
    #[must_use]
    pub fn new(table_id: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            concrete_type: CONCRETE_TYPE_QUERY_BUNDLE.to_string(),
            entity_id: table_id.into(),
            query: TableQuery { sql: sql.into() },
            part_mask: DEFAULT_PART_MASK,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableQuery {
    pub sql: String,
}

/// Response to a job-start request. The token may be absent even on success.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSubmitted {
    #[serde(default)]
    pub token: Option<String>,
}

/// Completed job result. Sections outside the requested part mask are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResultBundle {
    pub query_result: Option<QueryResultPart>,
    pub query_count: Option<i64>,
    pub select_columns: Vec<SelectColumn>,
}

impl QueryResultBundle {
    /// Rows of the bundle, flattened through the nested result wrapper.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        self.query_result
            .as_ref()
            .and_then(|part| part.query_results.as_ref())
            .map_or(&[], |set| set.rows.as_slice())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResultPart {
    pub query_results: Option<RowSet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub rows: Vec<TableRow>,
}

/// One matched record. By schema convention the value at position 0 is the
/// record's unique identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_number: Option<i64>,
    pub values: Vec<Option<String>>,
}

impl TableRow {
    /// The record identifier at position 0, when present.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.values.first().and_then(Option::as_deref)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectColumn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}
