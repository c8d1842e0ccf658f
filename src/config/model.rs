// src/config/model.rs

use serde::Deserialize;

use crate::notify::classify::ClassificationRules;
use crate::relaunch::policy::RetryPolicy;
use crate::types::{LogFormat, PayloadShape};

/// Settings as read from an optional TOML file and the environment.
///
/// Every field is optional here; the validated views
/// ([`RelaunchSettings`], [`NotifierSettings`], [`LoggingSettings`]) decide
/// which ones are required and fill in defaults.
///
/// ```toml
/// sns_topic = "arn:aws:sns:eu-west-2:000000000000:relaunch"
/// table_name = "data_pipeline_metadata"
/// steps_to_not_retry = ["collect_metrics"]
/// max_retry_count = 1
/// relaunch_payload_shape = "minimal"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    /// `SNS_TOPIC`: where relaunch requests / monitoring messages go.
    #[serde(default)]
    pub sns_topic: Option<String>,

    /// `TABLE_NAME`: pipeline metadata table holding cluster failure records.
    #[serde(default)]
    pub table_name: Option<String>,

    /// `STEPS_TO_NOT_RETRY`: comma-separated in the environment, a list in TOML.
    #[serde(default)]
    pub steps_to_not_retry: Option<Vec<String>>,

    /// `MAX_RETRY_COUNT`, default 1.
    #[serde(default)]
    pub max_retry_count: Option<u32>,

    /// `ENFORCE_MAX_RETRY`, default true.
    #[serde(default)]
    pub enforce_max_retry: Option<bool>,

    /// `RELAUNCH_PAYLOAD_SHAPE`, default `minimal`.
    #[serde(default)]
    pub relaunch_payload_shape: Option<PayloadShape>,

    /// `HIGH_PRIORITY_JOB_QUEUE`: regex matched against the job queue.
    #[serde(default)]
    pub high_priority_job_queue: Option<String>,

    /// `IGNORED_JOB_STATUSES`: statuses that never produce a notification.
    #[serde(default)]
    pub ignored_job_statuses: Option<Vec<String>>,

    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub log_format: Option<LogFormat>,

    #[serde(default)]
    pub environment: Option<String>,

    #[serde(default)]
    pub application: Option<String>,

    #[serde(default)]
    pub aws_region: Option<String>,

    #[serde(default)]
    pub aws_profile: Option<String>,
}

/// Validated settings for the cluster-relaunch decider.
#[derive(Debug, Clone)]
pub struct RelaunchSettings {
    pub sns_topic: String,
    pub table_name: String,
    pub retry_policy: RetryPolicy,
    pub payload_shape: PayloadShape,
    pub aws: AwsSettings,
}

/// Validated settings for the job-status notifier.
#[derive(Debug, Clone)]
pub struct NotifierSettings {
    pub sns_topic: String,
    pub rules: ClassificationRules,
    pub aws: AwsSettings,
}

/// Client construction hints; both fall back to the SDK's own resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: Option<String>,
    pub profile: Option<String>,
}

/// Logging settings. Unset values default; a level or format that does not
/// parse is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: tracing::Level,
    pub format: LogFormat,
    pub environment: String,
    pub application: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            format: LogFormat::default(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            application: DEFAULT_APPLICATION.to_string(),
        }
    }
}

pub(crate) const DEFAULT_MAX_RETRY_COUNT: u32 = 1;
pub(crate) const DEFAULT_HIGH_PRIORITY_JOB_QUEUE: &str = "pdm_object_tagger";
pub(crate) const DEFAULT_IGNORED_JOB_STATUSES: [&str; 3] = ["PENDING", "RUNNABLE", "STARTING"];
pub(crate) const DEFAULT_ENVIRONMENT: &str = "NOT_SET";
pub(crate) const DEFAULT_APPLICATION: &str = "emr_relauncher";

