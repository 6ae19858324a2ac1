//! Message and part records from `message/` and `part/`.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::finite_millis;
use crate::session::null_as_default;

/// One `message/<sessionId>/<messageId>.json` file.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageMeta {
    pub id: String,
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: MessageTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageTime {
    #[serde(default)]
    pub created: Option<Value>,
}

impl MessageMeta {
    pub fn created_ms(&self) -> Option<Number> {
        finite_millis(self.time.created.as_ref())
    }
}

/// One `part/<messageId>/<partId>.json` file.
///
/// Every part kind shares this envelope; only `type == "tool"` parts carry
/// `callID`, `tool` and `state`. Unknown top-level fields land in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallPart {
    pub id: String,
    #[serde(rename = "sessionID", default)]
    pub session_id: Option<String>,
    #[serde(rename = "messageID", default)]
    pub message_id: Option<String>,
    #[serde(rename = "type")]
    pub part_type: String,
    #[serde(rename = "callID", default)]
    pub call_id: Option<String>,
    #[serde(default)]
    pub tool: Option<String>,
    /// Free-form tool state (status, input, output, error, ...).
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolCallPart {
    pub fn is_tool(&self) -> bool {
        self.part_type == "tool"
    }

    /// A string field nested directly under `state`.
    pub fn state_str(&self, key: &str) -> Option<String> {
        self.state
            .as_ref()?
            .get(key)?
            .as_str()
            .map(str::to_string)
    }

    /// A numeric field under `state.time`.
    pub fn state_time_ms(&self, key: &str) -> Option<Number> {
        let time = self.state.as_ref()?.get("time")?;
        finite_millis(time.get(key))
    }
}
