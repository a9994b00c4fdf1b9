use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Wraps an envelope value as a JSON tool result. Domain failures are already
/// folded into the envelope's `success` flag; only serialization itself can
/// produce a protocol-level error.
pub(crate) fn envelope(value: impl Serialize) -> Result<CallToolResult, ErrorData> {
    Ok(CallToolResult::success(vec![Content::json(value)?]))
}
