//! Session listing route.

use crate::state::AppState;
use axum::{extract::State, Json};
use omo_dashboard_core::list_sessions;
use omo_dashboard_types::SessionsResponse;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// List main sessions of the configured project, newest first.
///
/// An unusable storage root (missing, or resolving outside itself) is
/// reported as an empty list rather than an error.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<SessionsResponse> {
    let storage_root = state.config.storage_root.clone();
    let project_root = state.config.project_root.clone();

    let result =
        tokio::task::spawn_blocking(move || list_sessions(&storage_root, &project_root)).await;

    let sessions = match result {
        Ok(Ok(sessions)) => sessions,
        Ok(Err(e)) if e.is_path_traversal() => {
            debug!(target: "omo::api", "Session tree rejected, listing nothing: {}", e);
            Vec::new()
        }
        Ok(Err(e)) => {
            warn!(target: "omo::api", "Failed to list sessions: {}", e);
            Vec::new()
        }
        Err(e) => {
            error!(target: "omo::api", "Session listing task failed: {}", e);
            Vec::new()
        }
    };

    Json(SessionsResponse { ok: true, sessions })
}
