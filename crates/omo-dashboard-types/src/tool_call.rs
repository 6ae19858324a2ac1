//! Redacted tool-call view returned to dashboard clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Sanitized projection of a [`crate::ToolCallPart`].
///
/// Summary fields lifted out of the tool state sit next to whatever
/// non-sensitive top-level fields the part carried (`extra`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallView {
    pub id: String,
    pub session_id: String,
    pub message_id: String,
    pub call_id: Option<String>,
    pub tool: Option<String>,
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<Number>,
    pub message_created_at_ms: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolCallView {
    /// Wire names of the fields above; `extra` must not shadow them.
    pub const FIELD_NAMES: &'static [&'static str] = &[
        "id",
        "sessionId",
        "messageId",
        "callId",
        "tool",
        "status",
        "title",
        "startedAtMs",
        "endedAtMs",
        "messageCreatedAtMs",
    ];
}
