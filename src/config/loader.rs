// src/config/loader.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::model::RawSettings;
use crate::errors::{RelayError, Result};

/// Snapshot of environment variables.
///
/// Handlers never read the process environment directly; they are given a
/// snapshot so that tests can build one from a literal map.
pub type EnvVars = BTreeMap<String, String>;

/// Capture the current process environment.
pub fn env_snapshot() -> EnvVars {
    std::env::vars().collect()
}

/// Load settings from a TOML file and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** check that
/// required values are present. Use the `TryFrom` conversions in
/// [`crate::config::validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Apply environment overrides on top of file (or default) settings.
///
/// An environment variable that is set always wins over the file value.
/// Empty values are treated as set; validation later rejects an empty topic
/// or table name.
pub fn overlay_env(mut raw: RawSettings, env: &EnvVars) -> Result<RawSettings> {
    if let Some(v) = env.get("SNS_TOPIC") {
        raw.sns_topic = Some(v.clone());
    }
    if let Some(v) = env.get("TABLE_NAME") {
        raw.table_name = Some(v.clone());
    }
    if let Some(v) = env.get("STEPS_TO_NOT_RETRY") {
        raw.steps_to_not_retry = Some(split_list(v));
    }
    if let Some(v) = env.get("MAX_RETRY_COUNT") {
        let count = v.trim().parse::<u32>().map_err(|e| {
            RelayError::ConfigError(format!("MAX_RETRY_COUNT must be a non-negative integer (got {v:?}): {e}"))
        })?;
        raw.max_retry_count = Some(count);
    }
    if let Some(v) = env.get("ENFORCE_MAX_RETRY") {
        raw.enforce_max_retry = Some(parse_bool("ENFORCE_MAX_RETRY", v)?);
    }
    if let Some(v) = env.get("RELAUNCH_PAYLOAD_SHAPE") {
        raw.relaunch_payload_shape = Some(v.parse().map_err(RelayError::ConfigError)?);
    }
    if let Some(v) = env.get("HIGH_PRIORITY_JOB_QUEUE") {
        raw.high_priority_job_queue = Some(v.clone());
    }
    if let Some(v) = env.get("IGNORED_JOB_STATUSES") {
        raw.ignored_job_statuses = Some(split_list(v));
    }
    if let Some(v) = env.get("LOG_LEVEL") {
        raw.log_level = Some(v.clone());
    }
    if let Some(v) = env.get("LOG_FORMAT") {
        raw.log_format = Some(v.parse().map_err(RelayError::ConfigError)?);
    }
    if let Some(v) = env.get("ENVIRONMENT") {
        raw.environment = Some(v.clone());
    }
    if let Some(v) = env.get("APPLICATION") {
        raw.application = Some(v.clone());
    }
    if let Some(v) = env.get("AWS_REGION") {
        raw.aws_region = Some(v.clone());
    }
    if let Some(v) = env.get("AWS_PROFILE") {
        raw.aws_profile = Some(v.clone());
    }
    Ok(raw)
}

/// Load settings: optional TOML file first, then environment overrides.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_settings(path: Option<&Path>, env: &EnvVars) -> Result<RawSettings> {
    let base = match path {
        Some(p) => load_from_path(p)?,
        None => RawSettings::default(),
    };
    overlay_env(base, env)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(RelayError::ConfigError(format!(
            "{name} must be a boolean (got {other:?})"
        ))),
    }
}
