//! Live dashboard snapshot route.

use crate::state::AppState;
use axum::{extract::State, Json};
use omo_dashboard_core::redact;
use serde_json::Value;
use std::sync::Arc;

/// Return the provider's snapshot with sensitive fields stripped.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(redact(state.snapshot.snapshot()))
}
