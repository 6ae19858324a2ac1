//! Session records as written by the agent, and the normalized listing view.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// One `session/<projectId>/<sessionId>.json` file.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionMeta {
    pub id: String,
    #[serde(rename = "projectID", default)]
    pub project_id: Option<String>,
    /// Working directory the session was started in.
    pub directory: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: SessionTime,
    /// Set for sub-agent sessions spawned from another session.
    #[serde(rename = "parentID", default, deserialize_with = "lenient_string")]
    pub parent_id: Option<String>,
}

/// Creation and update stamps, in epoch milliseconds.
///
/// Kept as raw JSON so that `null`, strings, or other junk written by older
/// agents do not make the whole record unreadable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionTime {
    #[serde(default)]
    pub created: Option<Value>,
    #[serde(default)]
    pub updated: Option<Value>,
}

impl SessionTime {
    /// Creation time, or 0 when absent or not a finite number.
    pub fn created_ms(&self) -> Number {
        finite_millis(self.created.as_ref()).unwrap_or_else(|| Number::from(0))
    }

    /// Update time, or 0 when absent or not a finite number.
    pub fn updated_ms(&self) -> Number {
        finite_millis(self.updated.as_ref()).unwrap_or_else(|| Number::from(0))
    }
}

impl SessionMeta {
    /// True for sessions started directly by the user (no parent session).
    pub fn is_main(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Session entry returned by `GET /sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListItem {
    pub id: String,
    pub title: Option<String>,
    pub created_at_ms: Number,
    pub updated_at_ms: Number,
}

impl From<&SessionMeta> for SessionListItem {
    fn from(meta: &SessionMeta) -> Self {
        let title = meta
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self {
            id: meta.id.clone(),
            title,
            created_at_ms: meta.time.created_ms(),
            updated_at_ms: meta.time.updated_ms(),
        }
    }
}

/// A millisecond stamp, kept exactly as written when it is a finite number.
///
/// Numbers too large for an `f64` (`1e400`) count as non-finite.
pub fn finite_millis(value: Option<&Value>) -> Option<Number> {
    match value? {
        Value::Number(number) if number.as_f64().is_some_and(f64::is_finite) => {
            Some(number.clone())
        }
        _ => None,
    }
}

/// Numeric order of two stamps; a missing stamp counts as 0.
pub fn compare_millis(a: Option<&Number>, b: Option<&Number>) -> Ordering {
    let ms = |n: Option<&Number>| n.and_then(Number::as_f64).unwrap_or(0.0);
    // Stamps are finite; -0 and 0 compare equal.
    ms(a).partial_cmp(&ms(b)).unwrap_or(Ordering::Equal)
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept any JSON value, keeping it only when it is a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}
