//! Confinement of filesystem access to the declared storage roots.

use crate::{DashboardError, Result};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Resolve `candidate` and require it to be one of `allowed_roots` or to live
/// beneath one of them.
///
/// Both sides are canonicalized (symlinks and `..` resolved) and compared
/// component by component, so `/data2` is never accepted for root `/data`.
/// Returns the canonical candidate on success.
pub fn assert_allowed_path(candidate: &Path, allowed_roots: &[PathBuf]) -> Result<PathBuf> {
    let traversal = || DashboardError::PathTraversal {
        path: candidate.to_path_buf(),
    };

    let canonical = canonicalize_best_effort(candidate).map_err(|_| traversal())?;

    let allowed = allowed_roots
        .iter()
        .filter_map(|root| canonicalize_best_effort(root).ok())
        .any(|root| canonical.starts_with(&root));

    if allowed {
        Ok(canonical)
    } else {
        warn!(
            target: "omo::paths",
            "Rejected path outside storage roots: {:?}",
            candidate
        );
        Err(traversal())
    }
}

/// Canonicalize a path that may not exist yet.
///
/// The deepest existing ancestor is canonicalized by the filesystem, so any
/// symlink or `..` inside it resolves the way the OS would. The missing tail
/// is then applied on top of that. A dangling symlink in the tail is an
/// error, as its target cannot be checked.
fn canonicalize_best_effort(path: &Path) -> io::Result<PathBuf> {
    if path.exists() {
        return std::fs::canonicalize(path);
    }

    let path = std::path::absolute(path)?;
    let mut missing_tail: Vec<Component<'_>> = Vec::new();
    let mut cursor = path.as_path();

    while !cursor.exists() {
        if cursor.symlink_metadata().is_ok() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "dangling symlink in path",
            ));
        }

        let (Some(last), Some(parent)) = (cursor.components().next_back(), cursor.parent()) else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no existing ancestor for path",
            ));
        };
        missing_tail.push(last);
        cursor = parent;
    }

    let mut canonical = std::fs::canonicalize(cursor)?;
    for component in missing_tail.iter().rev() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                canonical.pop();
            }
            other => canonical.push(other.as_os_str()),
        }
    }

    Ok(canonical)
}
