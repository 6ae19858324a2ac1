//! HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::{SessionListItem, ToolCallView};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub ok: bool,
    pub sessions: Vec<SessionListItem>,
}

/// Per-request bounds reported alongside tool calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallCaps {
    pub max_messages: usize,
    pub max_tool_calls: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallsResponse {
    pub ok: bool,
    pub session_id: String,
    pub tool_calls: Vec<ToolCallView>,
    pub caps: ToolCallCaps,
    pub truncated: bool,
}

/// Body for rejected or failed tool-call lookups: `{ok:false, sessionId, toolCalls:[]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallsRejection {
    pub ok: bool,
    pub session_id: String,
    pub tool_calls: Vec<ToolCallView>,
}

impl ToolCallsRejection {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            ok: false,
            session_id: session_id.into(),
            tool_calls: Vec::new(),
        }
    }
}
