//! Common test utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use omo_dashboard_core::{SnapshotProvider, StaticSnapshot};
use omo_dashboard_server::{config::Config, routes, state::AppState};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Storage root with empty `session/`, `message/` and `part/` trees.
pub fn storage_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    for sub in ["session", "message", "part"] {
        std::fs::create_dir_all(temp.path().join(sub)).unwrap();
    }
    temp
}

pub fn project_root() -> TempDir {
    TempDir::new().unwrap()
}

/// API router (unprefixed) over the given roots.
pub fn test_app(storage_root: &Path, project_root: &Path) -> Router {
    test_app_with_snapshot(storage_root, project_root, Arc::new(StaticSnapshot::default()))
}

pub fn test_app_with_snapshot(
    storage_root: &Path,
    project_root: &Path,
    snapshot: Arc<dyn SnapshotProvider>,
) -> Router {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        storage_root: storage_root.to_path_buf(),
        project_root: project_root.to_path_buf(),
        snapshot_path: None,
        static_dir: None,
    };
    let state = Arc::new(AppState::new(config, snapshot));
    routes::api_routes().with_state(state)
}

/// GET `uri` and return status plus parsed JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Body for {} is not JSON: {}", uri, e));
    (status, body)
}

pub struct SessionFixture<'a> {
    pub project_id: &'a str,
    pub session_id: &'a str,
    pub directory: &'a Path,
    pub title: Option<&'a str>,
    pub created: Option<i64>,
    pub updated: Option<i64>,
    pub parent_id: Option<&'a str>,
}

pub fn write_session_meta(storage_root: &Path, fixture: SessionFixture<'_>) {
    let dir = storage_root.join("session").join(fixture.project_id);
    std::fs::create_dir_all(&dir).unwrap();

    let mut meta = Map::new();
    meta.insert("id".into(), json!(fixture.session_id));
    meta.insert("projectID".into(), json!(fixture.project_id));
    meta.insert("directory".into(), json!(fixture.directory.to_string_lossy()));
    meta.insert(
        "time".into(),
        json!({ "created": fixture.created, "updated": fixture.updated }),
    );
    if let Some(title) = fixture.title {
        meta.insert("title".into(), json!(title));
    }
    if let Some(parent_id) = fixture.parent_id {
        meta.insert("parentID".into(), json!(parent_id));
    }

    std::fs::write(
        dir.join(format!("{}.json", fixture.session_id)),
        Value::Object(meta).to_string(),
    )
    .unwrap();
}

pub fn write_message_meta(storage_root: &Path, session_id: &str, message_id: &str, created: Option<i64>) {
    let dir = storage_root.join("message").join(session_id);
    std::fs::create_dir_all(&dir).unwrap();

    let mut meta = json!({ "id": message_id, "sessionID": session_id, "role": "assistant" });
    if let Some(created) = created {
        meta["time"] = json!({ "created": created });
    }
    std::fs::write(dir.join(format!("{message_id}.json")), meta.to_string()).unwrap();
}

pub fn write_tool_part(
    storage_root: &Path,
    session_id: &str,
    message_id: &str,
    call_id: &str,
    tool: &str,
    state: Option<Value>,
) -> PathBuf {
    let dir = storage_root.join("part").join(message_id);
    std::fs::create_dir_all(&dir).unwrap();

    let path = dir.join(format!("{call_id}.json"));
    let part = json!({
        "id": format!("part_{call_id}"),
        "sessionID": session_id,
        "messageID": message_id,
        "type": "tool",
        "callID": call_id,
        "tool": tool,
        "state": state.unwrap_or_else(|| json!({ "status": "completed", "input": {} })),
    });
    std::fs::write(&path, part.to_string()).unwrap();
    path
}

pub const SENSITIVE_KEYS: [&str; 5] = ["prompt", "input", "output", "error", "state"];

/// Independent walk so the assertion does not trust the code under test.
pub fn has_sensitive_keys(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(has_sensitive_keys),
        Value::Object(map) => map
            .iter()
            .any(|(key, child)| SENSITIVE_KEYS.contains(&key.as_str()) || has_sensitive_keys(child)),
        _ => false,
    }
}
