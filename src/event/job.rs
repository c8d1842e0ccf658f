// src/event/job.rs

//! Batch job state-change events, delivered wrapped in an SNS notification.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{RelayError, Result};

#[derive(Debug, Deserialize)]
struct SnsEnvelope {
    #[serde(rename = "Records")]
    records: Vec<SnsRecord>,
}

#[derive(Debug, Deserialize)]
struct SnsRecord {
    #[serde(rename = "Sns")]
    sns: SnsNotification,
}

#[derive(Debug, Deserialize)]
struct SnsNotification {
    #[serde(rename = "Message")]
    message: String,
}

#[derive(Debug, Deserialize)]
struct JobStatusMessage {
    detail: JobStatusDetail,
}

/// The `detail` object of a job state-change event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusDetail {
    pub job_name: String,
    pub status: String,
    pub job_queue: String,
    /// Epoch milliseconds.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub started_at: Option<i64>,
    #[serde(default)]
    pub stopped_at: Option<i64>,
    #[serde(default)]
    pub status_reason: Option<String>,
}

impl JobStatusDetail {
    /// Unwrap `Records[0].Sns.Message`, decode it, and read its `detail`.
    pub fn from_sns_envelope(event: &Value) -> Result<Self> {
        let envelope = SnsEnvelope::deserialize(event)
            .map_err(|e| RelayError::ValidationFailed(format!("SNS envelope: {e}")))?;

        let record = envelope.records.into_iter().next().ok_or_else(|| {
            RelayError::ValidationFailed("SNS envelope has no Records".to_string())
        })?;

        Self::from_message(&record.sns.message)
    }

    /// Decode a serialized job state-change message.
    pub fn from_message(message: &str) -> Result<Self> {
        let parsed: JobStatusMessage = serde_json::from_str(message)
            .map_err(|e| RelayError::ValidationFailed(format!("job state-change message: {e}")))?;
        Ok(parsed.detail)
    }
}
