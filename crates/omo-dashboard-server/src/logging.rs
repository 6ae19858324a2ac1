//! Logging configuration and initialization.
//!
//! Targets live under the `omo::` prefix (`omo::api`, `omo::storage`,
//! `omo::tool_calls`, `omo::paths`, `omo::snapshot`, `omo::startup`).
//! A preset picks the base levels, `--log target=level` refines them, and
//! `RUST_LOG` replaces both when set.

use std::collections::BTreeMap;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const TARGET_PREFIX: &str = "omo::";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: '{}'. Use 'text' or 'json'.", s)),
        }
    }
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Startup, request failures and path rejections
    #[default]
    Production,
    /// Per-request summaries
    Verbose,
    /// Skipped files and derivation counts
    Debug,
    Trace,
    /// Warnings and errors only
    Quiet,
}

impl LogPreset {
    /// Most specific flag wins: quiet, then trace, debug, verbose.
    pub fn from_flags(verbose: bool, debug: bool, trace: bool, quiet: bool) -> Self {
        if quiet {
            LogPreset::Quiet
        } else if trace {
            LogPreset::Trace
        } else if debug {
            LogPreset::Debug
        } else if verbose {
            LogPreset::Verbose
        } else {
            LogPreset::Production
        }
    }

    fn directives(self) -> Vec<&'static str> {
        match self {
            LogPreset::Production => vec![
                "omo::startup=info",
                "omo::api=info",
                "omo::paths=warn",
                "omo::snapshot=warn",
                "omo::storage=warn",
                "omo::tool_calls=warn",
                "tower_http=warn",
            ],
            LogPreset::Verbose => vec!["omo=info", "tower_http=info"],
            LogPreset::Debug => vec!["omo=debug", "tower_http=debug"],
            LogPreset::Trace => vec!["omo=trace", "tower_http=trace"],
            LogPreset::Quiet => vec!["omo=warn", "tower_http=error"],
        }
    }
}

/// Logging configuration built from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub preset: LogPreset,
    /// Per-target level overrides, keyed by full target name
    pub overrides: BTreeMap<String, Level>,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn from_cli(
        verbose: bool,
        debug: bool,
        trace: bool,
        quiet: bool,
        log_overrides: &[String],
        format: LogFormat,
    ) -> Self {
        Self {
            preset: LogPreset::from_flags(verbose, debug, trace, quiet),
            overrides: parse_overrides(log_overrides),
            format,
        }
    }

    /// Build an EnvFilter from this configuration.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }

        let mut directives: Vec<String> =
            self.preset.directives().into_iter().map(String::from).collect();
        directives.extend(
            self.overrides
                .iter()
                .map(|(target, level)| format!("{}={}", target, level.as_str().to_lowercase())),
        );

        EnvFilter::try_new(directives.join(",")).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Parse `target=level` pairs; each argument may hold several, comma separated.
///
/// Bare targets get the `omo::` prefix (`storage` -> `omo::storage`).
/// Entries with an unknown level are ignored.
fn parse_overrides(log_overrides: &[String]) -> BTreeMap<String, Level> {
    log_overrides
        .iter()
        .flat_map(|arg| arg.split(','))
        .filter_map(|part| {
            let (target, level) = part.split_once('=')?;
            let level = level.trim().parse::<Level>().ok()?;
            let target = target.trim();
            let target = if target.starts_with(TARGET_PREFIX) || target == "omo" || target == "tower_http"
            {
                target.to_string()
            } else {
                format!("{TARGET_PREFIX}{target}")
            };
            Some((target, level))
        })
        .collect()
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init(config: &LogConfig) {
    let filter = config.build_filter();

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }
}
