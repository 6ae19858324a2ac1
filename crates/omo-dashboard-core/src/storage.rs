//! Session metadata from the `session/` tree and storage layout helpers.
//!
//! Storage layout:
//! - session/<projectId>/<sessionId>.json: session metadata
//! - message/<sessionId>/<messageId>.json: message metadata
//! - part/<messageId>/<partId>.json: message parts (text, tool calls, ...)

use crate::{Result, assert_allowed_path};
use omo_dashboard_types::{SessionListItem, SessionMeta, compare_millis};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The three sub-trees of one storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRoots {
    pub session_dir: PathBuf,
    pub message_dir: PathBuf,
    pub part_dir: PathBuf,
}

/// Compose the sub-tree paths for `storage_root`. Pure; touches no disk.
pub fn get_storage_roots(storage_root: &Path) -> StorageRoots {
    StorageRoots {
        session_dir: storage_root.join("session"),
        message_dir: storage_root.join("message"),
        part_dir: storage_root.join("part"),
    }
}

/// Read every main session whose `directory` is exactly `project_root`.
///
/// Walks each project sub-directory of `session_dir`. Files that cannot be
/// read or parsed are skipped, as are child sessions (those with a parent).
/// A missing `session_dir` yields an empty list.
pub fn read_main_session_metas(session_dir: &Path, project_root: &Path) -> Vec<SessionMeta> {
    let Ok(project_dirs) = fs::read_dir(session_dir) else {
        debug!(target: "omo::storage", "No session directory at {:?}", session_dir);
        return Vec::new();
    };

    let mut metas = Vec::new();

    for entry in project_dirs.flatten() {
        let project_dir = entry.path();
        if !project_dir.is_dir() {
            continue;
        }

        for file in json_files(&project_dir) {
            let Some(meta) = read_json::<SessionMeta>(&file) else {
                continue;
            };

            // Byte equality; no prefix or path normalization.
            if meta.directory.as_bytes() != project_root.as_os_str().as_encoded_bytes() {
                continue;
            }
            if !meta.is_main() {
                continue;
            }

            metas.push(meta);
        }
    }

    debug!(
        target: "omo::storage",
        "Found {} sessions for project {:?}",
        metas.len(),
        project_root
    );

    metas
}

/// Directory holding the messages of `session_id`, if it exists.
///
/// Does no confinement check of its own; callers run the path guard.
pub fn get_message_dir(message_root: &Path, session_id: &str) -> Option<PathBuf> {
    let dir = message_root.join(session_id);
    dir.is_dir().then_some(dir)
}

/// Order by most recently updated, then most recently created, then id, all descending.
pub fn sort_session_items(items: &mut [SessionListItem]) {
    items.sort_by(|a, b| {
        compare_millis(Some(&b.updated_at_ms), Some(&a.updated_at_ms))
            .then_with(|| compare_millis(Some(&b.created_at_ms), Some(&a.created_at_ms)))
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Normalized, sorted session listing for one project.
///
/// Fails only when the session tree resolves outside `storage_root`.
pub fn list_sessions(storage_root: &Path, project_root: &Path) -> Result<Vec<SessionListItem>> {
    let storage = get_storage_roots(storage_root);
    assert_allowed_path(&storage.session_dir, &[storage_root.to_path_buf()])?;

    let mut items: Vec<SessionListItem> = read_main_session_metas(&storage.session_dir, project_root)
        .iter()
        .map(SessionListItem::from)
        .collect();
    sort_session_items(&mut items);

    Ok(items)
}

/// `*.json` files directly inside `dir`, sorted by name. Unreadable dirs give nothing.
pub(crate) fn json_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// Parse one JSON record, or `None` if it is unreadable or malformed.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!(target: "omo::storage", "Skipping unreadable {:?}: {}", path, e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(target: "omo::storage", "Skipping malformed {:?}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Number, Value, json};
    use tempfile::TempDir;

    fn write_session(root: &Path, project_id: &str, session_id: &str, meta: Value) {
        let dir = root.join("session").join(project_id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{session_id}.json")), meta.to_string()).unwrap();
    }

    #[test]
    fn test_storage_roots_are_fixed_subpaths() {
        let roots = get_storage_roots(Path::new("/srv/storage"));
        assert_eq!(roots.session_dir, PathBuf::from("/srv/storage/session"));
        assert_eq!(roots.message_dir, PathBuf::from("/srv/storage/message"));
        assert_eq!(roots.part_dir, PathBuf::from("/srv/storage/part"));
    }

    #[test]
    fn test_missing_session_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let metas = read_main_session_metas(&temp.path().join("session"), Path::new("/p"));
        assert!(metas.is_empty());
    }

    #[test]
    fn test_filters_by_exact_directory() {
        let temp = TempDir::new().unwrap();
        write_session(temp.path(), "a", "ses_1", json!({ "id": "ses_1", "directory": "/work/app" }));
        write_session(temp.path(), "a", "ses_2", json!({ "id": "ses_2", "directory": "/work/app2" }));
        write_session(temp.path(), "b", "ses_3", json!({ "id": "ses_3", "directory": "/work/app/" }));
        write_session(temp.path(), "b", "ses_4", json!({ "id": "ses_4", "directory": "/work/app" }));

        let mut ids: Vec<String> =
            read_main_session_metas(&temp.path().join("session"), Path::new("/work/app"))
                .into_iter()
                .map(|m| m.id)
                .collect();
        ids.sort();
        assert_eq!(ids, vec!["ses_1", "ses_4"]);
    }

    #[test]
    fn test_skips_malformed_and_child_sessions() {
        let temp = TempDir::new().unwrap();
        write_session(temp.path(), "a", "ses_ok", json!({ "id": "ses_ok", "directory": "/p" }));
        write_session(
            temp.path(),
            "a",
            "ses_child",
            json!({ "id": "ses_child", "directory": "/p", "parentID": "ses_ok" }),
        );
        write_session(temp.path(), "a", "ses_noid", json!({ "directory": "/p" }));
        let dir = temp.path().join("session").join("a");
        fs::write(dir.join("ses_broken.json"), "{ not json").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();
        fs::write(temp.path().join("session").join("stray.json"), "{}").unwrap();

        let metas = read_main_session_metas(&temp.path().join("session"), Path::new("/p"));
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].id, "ses_ok");
    }

    #[test]
    fn test_get_message_dir() {
        let temp = TempDir::new().unwrap();
        let message_root = temp.path().join("message");
        fs::create_dir_all(message_root.join("ses_1")).unwrap();

        assert_eq!(
            get_message_dir(&message_root, "ses_1"),
            Some(message_root.join("ses_1"))
        );
        assert_eq!(get_message_dir(&message_root, "ses_missing"), None);
    }

    #[test]
    fn test_sort_is_total() {
        let item = |id: &str, created: i64, updated: i64| SessionListItem {
            id: id.to_string(),
            title: None,
            created_at_ms: Number::from(created),
            updated_at_ms: Number::from(updated),
        };
        let mut items = vec![
            item("ses_z", 0, 0),
            item("ses_a", 10, 50),
            item("ses_b", 20, 50),
            item("ses_c", 20, 50),
            item("ses_d", 5, 100),
        ];
        sort_session_items(&mut items);

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ses_d", "ses_c", "ses_b", "ses_a", "ses_z"]);
    }

    #[test]
    fn test_list_sessions_normalizes_and_sorts() {
        let temp = TempDir::new().unwrap();
        write_session(
            temp.path(),
            "a",
            "ses_1",
            json!({ "id": "ses_1", "directory": "/p", "title": " One ", "time": { "created": 1, "updated": 2 } }),
        );
        write_session(
            temp.path(),
            "a",
            "ses_2",
            json!({ "id": "ses_2", "directory": "/p", "time": { "created": 3, "updated": 4 } }),
        );

        let items = list_sessions(temp.path(), Path::new("/p")).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "ses_2");
        assert_eq!(items[0].title, None);
        assert_eq!(items[1].title.as_deref(), Some("One"));
    }

    #[test]
    fn test_list_sessions_orders_fractional_stamps() {
        let temp = TempDir::new().unwrap();
        write_session(
            temp.path(),
            "a",
            "ses_x",
            json!({ "id": "ses_x", "directory": "/p", "time": { "created": 100, "updated": 50.2 } }),
        );
        write_session(
            temp.path(),
            "a",
            "ses_y",
            json!({ "id": "ses_y", "directory": "/p", "time": { "created": 1, "updated": 50.7 } }),
        );

        let items = list_sessions(temp.path(), Path::new("/p")).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ses_y", "ses_x"]);
        assert_eq!(Value::Number(items[0].updated_at_ms.clone()), json!(50.7));
        assert_eq!(Value::Number(items[1].updated_at_ms.clone()), json!(50.2));
    }

    #[test]
    fn test_list_sessions_keeps_overflowing_stamp_as_zero() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("session").join("a");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("ses_inf.json"),
            r#"{"id":"ses_inf","directory":"/p","time":{"created":1,"updated":1e400}}"#,
        )
        .unwrap();

        let items = list_sessions(temp.path(), Path::new("/p")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].created_at_ms, Number::from(1));
        assert_eq!(items[0].updated_at_ms, Number::from(0));
    }

    #[test]
    fn test_list_sessions_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let items = list_sessions(&temp.path().join("absent"), Path::new("/p")).unwrap();
        assert!(items.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_sessions_rejects_escaping_session_tree() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("session")).unwrap();

        let err = list_sessions(temp.path(), Path::new("/p")).unwrap_err();
        assert!(err.is_path_traversal());
    }
}
