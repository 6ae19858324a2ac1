//! HTTP route handlers.

pub mod dashboard;
pub mod sessions;
pub mod tool_calls;

use crate::state::AppState;
use axum::{routing::get, Json, Router};
use omo_dashboard_types::HealthResponse;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// The JSON API, unprefixed.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/dashboard", get(dashboard::get))
        .route("/sessions", get(sessions::list))
        .route("/tool-calls/{session_id}", get(tool_calls::list))
}

/// Full application: API under `/api`, optional static UI, request tracing.
pub fn app(state: Arc<AppState>) -> Router {
    let mut router = Router::new().nest("/api", api_routes());

    if let Some(static_dir) = &state.config.static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
