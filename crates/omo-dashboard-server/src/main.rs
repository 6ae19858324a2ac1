//! omo dashboard server - read-only HTTP API over an agent session store.

use anyhow::Result;
use clap::Parser;
use omo_dashboard_server::{config, logging, routes, state};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use config::Config;
use logging::{LogConfig, LogFormat};
use state::AppState;

/// Dashboard server for agent sessions, messages and tool calls.
#[derive(Parser, Debug)]
#[command(name = "omo-dashboard-server")]
#[command(about = "Read-only HTTP API over an agent session store")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the storage root (directory holding session/, message/, part/)
    #[arg(long, value_name = "DIR")]
    storage_root: Option<PathBuf>,

    /// Override the project directory whose sessions are listed
    #[arg(long, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// JSON file with the current dashboard snapshot
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Enable verbose logging (INFO level for all targets)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging
    #[arg(long)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "storage=debug").
    /// Can be specified multiple times. Targets are prefixed with "omo::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        &cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(storage_root) = cli.storage_root {
        config.storage_root = storage_root;
    }
    if let Some(project_root) = cli.project_root {
        config.project_root = project_root;
    }
    if let Some(snapshot) = cli.snapshot {
        config.snapshot_path = Some(snapshot);
    }

    tracing::info!(
        target: "omo::startup",
        "Serving storage {:?} for project {:?}",
        config.storage_root,
        config.project_root
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = Arc::new(AppState::from_config(config));
    let app = routes::app(state);

    tracing::info!(target: "omo::startup", "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
