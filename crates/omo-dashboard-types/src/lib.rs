//! Shared types for the omo dashboard: on-disk storage records and HTTP bodies.

mod api;
mod message;
mod session;
mod tool_call;

pub use api::*;
pub use message::*;
pub use session::*;
pub use tool_call::*;
