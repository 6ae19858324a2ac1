//! Dashboard snapshot providers.
//!
//! The live snapshot is produced outside this crate; the server only needs
//! something that can hand it a JSON payload on demand.

use crate::Result;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::warn;

/// Source of the pre-built `/dashboard` payload.
pub trait SnapshotProvider: Send + Sync {
    fn snapshot(&self) -> Value;
}

impl<F> SnapshotProvider for F
where
    F: Fn() -> Value + Send + Sync,
{
    fn snapshot(&self) -> Value {
        self()
    }
}

/// Always returns the same payload.
pub struct StaticSnapshot(Value);

impl StaticSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }
}

impl Default for StaticSnapshot {
    fn default() -> Self {
        Self(empty_snapshot())
    }
}

impl SnapshotProvider for StaticSnapshot {
    fn snapshot(&self) -> Value {
        self.0.clone()
    }
}

/// Re-reads a JSON file written by the snapshot producer on every call.
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read and parse the file once, without any fallback.
    pub fn load(&self) -> Result<Value> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SnapshotProvider for FileSnapshot {
    fn snapshot(&self) -> Value {
        match self.load() {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    target: "omo::snapshot",
                    "Failed to load snapshot from {:?}: {}",
                    self.path,
                    e
                );
                empty_snapshot()
            }
        }
    }
}

/// Payload shown before the producer has observed any activity.
pub fn empty_snapshot() -> Value {
    json!({
        "mainSession": {
            "agent": "-",
            "currentModel": null,
            "currentTool": "-",
            "lastUpdatedLabel": "never",
            "session": "-",
            "statusPill": "idle"
        },
        "planProgress": {
            "name": "-",
            "completed": 0,
            "total": 0,
            "path": "",
            "statusPill": "not started",
            "steps": []
        },
        "backgroundTasks": [],
        "timeSeries": {
            "windowMs": 0,
            "bucketMs": 0,
            "buckets": 0,
            "anchorMs": 0,
            "serverNowMs": 0,
            "series": []
        },
        "raw": null
    })
}
