//! Tool-call listing for one session, bounded and redacted.

use crate::storage::{json_files, read_json};
use crate::{Result, StorageRoots, assert_allowed_path, redact_map};
use omo_dashboard_types::{MessageMeta, ToolCallCaps, ToolCallPart, ToolCallView, compare_millis};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Most messages examined per request.
pub const MAX_TOOL_CALL_MESSAGES: usize = 200;

/// Most tool calls returned per request.
pub const MAX_TOOL_CALLS: usize = 300;

pub fn caps() -> ToolCallCaps {
    ToolCallCaps {
        max_messages: MAX_TOOL_CALL_MESSAGES,
        max_tool_calls: MAX_TOOL_CALLS,
    }
}

/// Inputs for [`derive_tool_calls`].
#[derive(Debug, Clone, Copy)]
pub struct ToolCallRequest<'a> {
    pub storage: &'a StorageRoots,
    pub session_id: &'a str,
    pub allowed_roots: &'a [PathBuf],
}

#[derive(Debug, Clone, Default)]
pub struct DerivedToolCalls {
    pub tool_calls: Vec<ToolCallView>,
    /// Set when messages or tool calls beyond the caps were left out.
    pub truncated: bool,
}

/// Collect the redacted tool calls of one session in message order.
///
/// Malformed message or part files are skipped. Every directory and file is
/// passed through the path guard before it is read, and an escape aborts the
/// whole derivation. A session without a message directory yields an empty
/// result; reporting it as missing is up to the caller.
pub fn derive_tool_calls(request: ToolCallRequest<'_>) -> Result<DerivedToolCalls> {
    let ToolCallRequest {
        storage,
        session_id,
        allowed_roots,
    } = request;

    let message_dir = storage.message_dir.join(session_id);
    assert_allowed_path(&message_dir, allowed_roots)?;

    let mut messages = read_messages(&message_dir, allowed_roots)?;
    let mut derived = DerivedToolCalls::default();

    if messages.len() > MAX_TOOL_CALL_MESSAGES {
        derived.truncated = true;
        messages.truncate(MAX_TOOL_CALL_MESSAGES);
    }

    'messages: for message in &messages {
        let part_dir = storage.part_dir.join(&message.id);
        assert_allowed_path(&part_dir, allowed_roots)?;

        for file in json_files(&part_dir) {
            assert_allowed_path(&file, allowed_roots)?;
            let Some(part) = read_json::<ToolCallPart>(&file) else {
                continue;
            };
            if !part.is_tool() {
                continue;
            }

            if derived.tool_calls.len() == MAX_TOOL_CALLS {
                derived.truncated = true;
                break 'messages;
            }
            derived.tool_calls.push(to_view(part, message, session_id));
        }
    }

    debug!(
        target: "omo::tool_calls",
        "Derived {} tool calls from {} messages for {} (truncated: {})",
        derived.tool_calls.len(),
        messages.len(),
        session_id,
        derived.truncated
    );

    Ok(derived)
}

/// Parse the messages in `dir`, ordered by creation time then id.
///
/// Messages without a creation time sort as time 0.
fn read_messages(dir: &Path, allowed_roots: &[PathBuf]) -> Result<Vec<MessageMeta>> {
    let mut messages = Vec::new();
    for file in json_files(dir) {
        assert_allowed_path(&file, allowed_roots)?;
        if let Some(message) = read_json::<MessageMeta>(&file) {
            messages.push(message);
        }
    }

    messages.sort_by(|a, b| {
        compare_millis(a.created_ms().as_ref(), b.created_ms().as_ref())
            .then_with(|| a.id.cmp(&b.id))
    });

    Ok(messages)
}

/// Lift the summary fields out of `state`, then drop every sensitive key.
fn to_view(part: ToolCallPart, message: &MessageMeta, session_id: &str) -> ToolCallView {
    let status = part.state_str("status");
    let title = part.state_str("title");
    let started_at_ms = part.state_time_ms("start");
    let ended_at_ms = part.state_time_ms("end");

    let mut extra = redact_map(part.extra);
    extra.retain(|key, _| !ToolCallView::FIELD_NAMES.contains(&key.as_str()));

    ToolCallView {
        id: part.id,
        session_id: part.session_id.unwrap_or_else(|| session_id.to_string()),
        message_id: part.message_id.unwrap_or_else(|| message.id.clone()),
        call_id: part.call_id,
        tool: part.tool,
        status,
        title,
        started_at_ms,
        ended_at_ms,
        message_created_at_ms: message.created_ms(),
        extra,
    }
}
