//! Shared application state.

use crate::config::Config;
use omo_dashboard_core::{FileSnapshot, SnapshotProvider, StaticSnapshot};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state.
///
/// Holds no per-request data; every handler reads the store afresh.
pub struct AppState {
    pub config: Config,
    pub snapshot: Arc<dyn SnapshotProvider>,
}

impl AppState {
    pub fn new(config: Config, snapshot: Arc<dyn SnapshotProvider>) -> Self {
        Self { config, snapshot }
    }

    /// Build state with the snapshot source named in the config, if any.
    pub fn from_config(config: Config) -> Self {
        let snapshot: Arc<dyn SnapshotProvider> = match &config.snapshot_path {
            Some(path) => Arc::new(FileSnapshot::new(path.clone())),
            None => Arc::new(StaticSnapshot::default()),
        };
        Self::new(config, snapshot)
    }

    /// Roots every filesystem read must stay within.
    pub fn allowed_roots(&self) -> Vec<PathBuf> {
        vec![self.config.storage_root.clone()]
    }
}
