//! omo dashboard server library - HTTP API over the agent session store.
//!
//! This library provides the HTTP routes, configuration and application state
//! for the dashboard server. It's separated from main.rs to enable integration testing.

pub mod config;
pub mod logging;
pub mod routes;
pub mod state;
