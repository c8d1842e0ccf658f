// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `LOG_LEVEL` (environment or config file, e.g. "INFO", "debug"); an
//!    unknown name is rejected during settings validation
//! 3. default to `info`
//!
//! Logs go to STDOUT, which the function runtime captures and ships. Each
//! handler call runs inside an `invocation` span that carries the deployment
//! environment and application name, so there is no global logger state to
//! reset between invocations.

use std::fmt::Debug;

use anyhow::Result;
use serde::Serialize;
use tracing::Span;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;
use crate::config::LoggingSettings;
use crate::types::LogFormat;

/// Initialise the global logging subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_logging(cli_level: Option<LogLevel>, settings: &LoggingSettings) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None => settings.level,
    };

    let builder = fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stdout);

    // Already-initialised is the only failure mode here.
    let _ = match settings.format {
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .try_init(),
        LogFormat::Text => builder.try_init(),
    };

    Ok(())
}

/// Span wrapping one handler invocation.
pub fn invocation_span(handler: &'static str, settings: &LoggingSettings) -> Span {
    tracing::info_span!(
        "invocation",
        handler,
        environment = %settings.environment,
        application = %settings.application,
    )
}

/// Best-effort rendering of a value for log lines: pretty JSON, then compact
/// JSON, then `Debug`. Never used for published payloads.
pub fn display_json<T: Serialize + Debug + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .or_else(|_| serde_json::to_string(value))
        .unwrap_or_else(|_| format!("{value:?}"))
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

/// Level names accepted from `LOG_LEVEL`, case-insensitive.
pub(crate) fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" | "critical" | "fatal" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
