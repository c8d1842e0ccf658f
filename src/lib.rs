// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod event;
pub mod logging;
pub mod notify;
pub mod outcome;
pub mod publish;
pub mod relaunch;
pub mod services;
pub mod types;

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{error, info, Instrument};

use crate::cli::{CliArgs, Command};
use crate::config::{
    env_snapshot, load_settings, AwsSettings, EnvVars, LoggingSettings, NotifierSettings,
    RawSettings, RelaunchSettings,
};
use crate::errors::{RelayError, Result};
use crate::logging::invocation_span;
use crate::notify::handle_job_status;
use crate::outcome::Outcome;
use crate::relaunch::{handle_relaunch, records_from_rows};
use crate::services::{DryRunPublisher, MemoryRecordStore, Publisher, RecordStore};

/// High-level entry point used by `main.rs`: [`run_with_env`] over the
/// current process environment.
pub async fn run(args: CliArgs) -> Result<Outcome> {
    run_with_env(args, &env_snapshot()).await
}

/// Run one invocation against an explicit environment snapshot.
///
/// This wires together:
/// - settings loading (optional TOML file + environment)
/// - logging
/// - the record store and publisher (AWS, fixture file, or dry-run)
/// - exactly one handler invocation
pub async fn run_with_env(args: CliArgs, env: &EnvVars) -> Result<Outcome> {
    let loaded = load_settings(args.config.as_deref().map(Path::new), env)
        .and_then(|raw| LoggingSettings::try_from(&raw).map(|logging| (raw, logging)));
    let (raw, logging) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            // Nothing else is logged yet; report through defaults plus LOG_LEVEL.
            logging::init_logging(args.log_level, &fallback_logging(env))?;
            log_fatal(&e);
            return Err(e);
        }
    };
    logging::init_logging(args.log_level, &logging)?;

    let outcome = match &args.command {
        Command::Relaunch { event, records } => {
            let settings = RelaunchSettings::try_from(&raw).inspect_err(log_fatal)?;
            let event = read_event(event).inspect_err(log_fatal)?;
            let store = build_store(&settings, records.as_deref())
                .await
                .inspect_err(log_fatal)?;
            let publisher = build_publisher(args.dry_run, &settings.aws)
                .await
                .inspect_err(log_fatal)?;

            handle_relaunch(&event, &settings, store.as_ref(), publisher.as_ref())
                .instrument(invocation_span("relaunch", &logging))
                .await?
        }
        Command::Notify { event } => {
            let settings = NotifierSettings::try_from(&raw).inspect_err(log_fatal)?;
            let event = read_event(event).inspect_err(log_fatal)?;
            let publisher = build_publisher(args.dry_run, &settings.aws)
                .await
                .inspect_err(log_fatal)?;

            handle_job_status(&event, &settings, publisher.as_ref())
                .instrument(invocation_span("notify", &logging))
                .await?
        }
    };

    info!(outcome = outcome.label(), "{outcome}");
    Ok(outcome)
}

fn log_fatal(e: &RelayError) {
    error!(kind = e.kind(), error = %e, "invocation cannot start");
}

/// Logging settings used when the real ones cannot be loaded: defaults,
/// plus `LOG_LEVEL` if it names a known level.
fn fallback_logging(env: &EnvVars) -> LoggingSettings {
    let raw = RawSettings {
        log_level: env.get("LOG_LEVEL").cloned(),
        ..RawSettings::default()
    };
    LoggingSettings::try_from(&raw).unwrap_or_default()
}

fn read_event(path: &str) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    let event = serde_json::from_str(&contents)
        .map_err(|e| RelayError::ValidationFailed(format!("event file {path}: {e}")))?;
    Ok(event)
}

/// Fixture file when given, otherwise the configured table.
async fn build_store(
    settings: &RelaunchSettings,
    records: Option<&str>,
) -> Result<Box<dyn RecordStore>> {
    if let Some(path) = records {
        let contents = fs::read_to_string(path)?;
        let rows: Vec<Value> = serde_json::from_str(&contents)
            .map_err(|e| RelayError::ValidationFailed(format!("records file {path}: {e}")))?;
        let records = records_from_rows(rows)?;
        return Ok(Box::new(MemoryRecordStore::new(records)));
    }
    table_store(settings).await
}

async fn build_publisher(dry_run: bool, aws: &AwsSettings) -> Result<Box<dyn Publisher>> {
    if dry_run {
        return Ok(Box::new(DryRunPublisher));
    }
    topic_publisher(aws).await
}

#[cfg(feature = "aws")]
async fn table_store(settings: &RelaunchSettings) -> Result<Box<dyn RecordStore>> {
    let sdk = services::aws::load_sdk_config(&settings.aws).await;
    Ok(Box::new(services::dynamo::DynamoRecordStore::new(
        &sdk,
        settings.table_name.clone(),
    )))
}

#[cfg(not(feature = "aws"))]
async fn table_store(_settings: &RelaunchSettings) -> Result<Box<dyn RecordStore>> {
    Err(RelayError::ConfigError(
        "built without the `aws` feature: pass --records to read a fixture file".to_string(),
    ))
}

#[cfg(feature = "aws")]
async fn topic_publisher(aws: &AwsSettings) -> Result<Box<dyn Publisher>> {
    let sdk = services::aws::load_sdk_config(aws).await;
    Ok(Box::new(services::sns::SnsPublisher::new(&sdk)))
}

#[cfg(not(feature = "aws"))]
async fn topic_publisher(_aws: &AwsSettings) -> Result<Box<dyn Publisher>> {
    Err(RelayError::ConfigError(
        "built without the `aws` feature: pass --dry-run to log instead of publishing".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvVars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn fallback_logging_keeps_a_valid_level() {
        let logging = fallback_logging(&env(&[("LOG_LEVEL", "debug"), ("LOG_FORMAT", "xml")]));
        assert_eq!(logging.level, tracing::Level::DEBUG);
        assert_eq!(logging.format, crate::types::LogFormat::Json);
    }

    #[test]
    fn fallback_logging_ignores_an_unknown_level() {
        assert_eq!(
            fallback_logging(&env(&[("LOG_LEVEL", "verbose")])),
            LoggingSettings::default()
        );
    }
}
