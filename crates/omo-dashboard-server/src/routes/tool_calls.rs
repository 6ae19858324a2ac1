//! Tool-call listing route.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use omo_dashboard_core::{
    assert_allowed_path, caps, derive_tool_calls, get_message_dir, get_storage_roots,
    DashboardError, ToolCallRequest,
};
use omo_dashboard_types::{ToolCallsRejection, ToolCallsResponse};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, error};

static SESSION_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap());

pub fn is_valid_session_id(session_id: &str) -> bool {
    SESSION_ID_PATTERN.is_match(session_id)
}

/// Error type for tool-call lookups.
///
/// Every variant answers with `{ok:false, sessionId, toolCalls:[]}`.
#[derive(Debug)]
pub enum ToolCallsError {
    InvalidSessionId(String),
    SessionNotFound(String),
    Internal {
        session_id: String,
        source: DashboardError,
    },
}

impl IntoResponse for ToolCallsError {
    fn into_response(self) -> Response {
        let (status, session_id) = match self {
            ToolCallsError::InvalidSessionId(id) => (StatusCode::BAD_REQUEST, id),
            ToolCallsError::SessionNotFound(id) => (StatusCode::NOT_FOUND, id),
            ToolCallsError::Internal { session_id, source } => {
                error!(
                    target: "omo::api",
                    "Tool-call derivation failed for {}: {}",
                    session_id,
                    source
                );
                (StatusCode::INTERNAL_SERVER_ERROR, session_id)
            }
        };
        (status, Json(ToolCallsRejection::new(session_id))).into_response()
    }
}

/// List the redacted tool calls of one session.
///
/// Unlike `/sessions`, a path-guard rejection here is not softened: it
/// surfaces as a server error.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ToolCallsResponse>, ToolCallsError> {
    if !is_valid_session_id(&session_id) {
        debug!(target: "omo::api", "Rejected session id {:?}", session_id);
        return Err(ToolCallsError::InvalidSessionId(session_id));
    }

    let storage = get_storage_roots(&state.config.storage_root);
    let Some(message_dir) = get_message_dir(&storage.message_dir, &session_id) else {
        return Err(ToolCallsError::SessionNotFound(session_id));
    };

    let allowed_roots = state.allowed_roots();
    let id = session_id.clone();
    let derived = tokio::task::spawn_blocking(move || {
        assert_allowed_path(&message_dir, &allowed_roots)?;
        derive_tool_calls(ToolCallRequest {
            storage: &storage,
            session_id: &id,
            allowed_roots: &allowed_roots,
        })
    })
    .await
    .map_err(|e| DashboardError::TaskJoin(e.to_string()))
    .and_then(|result| result)
    .map_err(|source| ToolCallsError::Internal {
        session_id: session_id.clone(),
        source,
    })?;

    Ok(Json(ToolCallsResponse {
        ok: true,
        session_id,
        tool_calls: derived.tool_calls,
        caps: caps(),
        truncated: derived.truncated,
    }))
}
