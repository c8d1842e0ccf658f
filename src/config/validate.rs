// src/config/validate.rs

use std::collections::BTreeSet;

use regex::Regex;

use crate::config::model::{
    AwsSettings, LoggingSettings, NotifierSettings, RawSettings, RelaunchSettings,
    DEFAULT_APPLICATION, DEFAULT_ENVIRONMENT, DEFAULT_HIGH_PRIORITY_JOB_QUEUE,
    DEFAULT_IGNORED_JOB_STATUSES, DEFAULT_MAX_RETRY_COUNT,
};
use crate::errors::{RelayError, Result};
use crate::logging::parse_level_str;
use crate::notify::classify::ClassificationRules;
use crate::relaunch::policy::RetryPolicy;

impl TryFrom<&RawSettings> for RelaunchSettings {
    type Error = RelayError;

    fn try_from(raw: &RawSettings) -> std::result::Result<Self, Self::Error> {
        let sns_topic = require(&raw.sns_topic, "SNS_TOPIC")?;
        let table_name = require(&raw.table_name, "TABLE_NAME")?;

        let retry_policy = RetryPolicy {
            steps_not_to_retry: raw
                .steps_to_not_retry
                .iter()
                .flatten()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            max_retry_count: raw.max_retry_count.unwrap_or(DEFAULT_MAX_RETRY_COUNT),
            enforce_max_retry: raw.enforce_max_retry.unwrap_or(true),
        };

        Ok(RelaunchSettings {
            sns_topic,
            table_name,
            retry_policy,
            payload_shape: raw.relaunch_payload_shape.unwrap_or_default(),
            aws: aws_settings(raw),
        })
    }
}

impl TryFrom<&RawSettings> for NotifierSettings {
    type Error = RelayError;

    fn try_from(raw: &RawSettings) -> std::result::Result<Self, Self::Error> {
        let sns_topic = require(&raw.sns_topic, "SNS_TOPIC")?;

        let pattern = raw
            .high_priority_job_queue
            .as_deref()
            .unwrap_or(DEFAULT_HIGH_PRIORITY_JOB_QUEUE);
        if pattern.trim().is_empty() {
            return Err(RelayError::ConfigError(
                "HIGH_PRIORITY_JOB_QUEUE must not be empty".to_string(),
            ));
        }
        let high_priority_queue = Regex::new(pattern).map_err(|e| {
            RelayError::ConfigError(format!("HIGH_PRIORITY_JOB_QUEUE is not a valid regex: {e}"))
        })?;

        let ignored_statuses: BTreeSet<String> = match &raw.ignored_job_statuses {
            Some(list) => list
                .iter()
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_IGNORED_JOB_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Ok(NotifierSettings {
            sns_topic,
            rules: ClassificationRules {
                high_priority_queue,
                ignored_statuses,
            },
            aws: aws_settings(raw),
        })
    }
}

impl TryFrom<&RawSettings> for LoggingSettings {
    type Error = RelayError;

    fn try_from(raw: &RawSettings) -> std::result::Result<Self, Self::Error> {
        let level = match raw.log_level.as_deref().map(str::trim) {
            None | Some("") => tracing::Level::INFO,
            Some(value) => parse_level_str(value).ok_or_else(|| {
                RelayError::ConfigError(format!(
                    "LOG_LEVEL must be one of debug, info, warning, error, critical (got {value:?})"
                ))
            })?,
        };

        Ok(LoggingSettings {
            level,
            format: raw.log_format.unwrap_or_default(),
            environment: raw
                .environment
                .clone()
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            application: raw
                .application
                .clone()
                .unwrap_or_else(|| DEFAULT_APPLICATION.to_string()),
        })
    }
}

fn require(value: &Option<String>, name: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(RelayError::ConfigError(format!(
            "required setting {name} is unset"
        ))),
    }
}

fn aws_settings(raw: &RawSettings) -> AwsSettings {
    AwsSettings {
        region: raw.aws_region.clone().filter(|s| !s.trim().is_empty()),
        profile: raw.aws_profile.clone().filter(|s| !s.trim().is_empty()),
    }
}
