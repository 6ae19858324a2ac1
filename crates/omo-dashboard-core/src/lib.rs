//! Read-only data access over an agent session store.
//!
//! Everything here reads the `session/`, `message/` and `part/` JSON trees
//! under one storage root and hands back sanitized, deterministically
//! ordered views. Nothing in this crate writes to the store.

mod error;
mod paths;
mod redact;
mod snapshot;
mod storage;
mod tool_calls;

pub use error::DashboardError;
pub use paths::assert_allowed_path;
pub use redact::{SENSITIVE_KEYS, contains_sensitive_key, is_sensitive_key, redact, redact_map};
pub use snapshot::{FileSnapshot, SnapshotProvider, StaticSnapshot, empty_snapshot};
pub use storage::{
    StorageRoots, get_message_dir, get_storage_roots, list_sessions, read_main_session_metas,
    sort_session_items,
};
pub use tool_calls::{
    DerivedToolCalls, MAX_TOOL_CALL_MESSAGES, MAX_TOOL_CALLS, ToolCallRequest, caps,
    derive_tool_calls,
};

/// Result type for dashboard data access.
pub type Result<T> = std::result::Result<T, DashboardError>;
