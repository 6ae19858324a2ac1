//! Error types for dashboard data access.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Path escapes allowed storage roots: {}", path.display())]
    PathTraversal { path: PathBuf },

    #[error("Background task failed: {0}")]
    TaskJoin(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn is_path_traversal(&self) -> bool {
        matches!(self, DashboardError::PathTraversal { .. })
    }
}
