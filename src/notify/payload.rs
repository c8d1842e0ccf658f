// src/notify/payload.rs

use serde::Serialize;

use crate::errors::Result;
use crate::event::JobStatusDetail;
use crate::notify::classify::Classification;
use crate::notify::elements::{build_custom_elements, CustomElement};
use crate::types::{NotificationType, Severity};

pub const SLACK_USERNAME: &str = "AWS Batch Job Notification";

/// Message consumed by the monitoring/alerting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitoringPayload {
    pub severity: Severity,
    pub notification_type: NotificationType,
    pub slack_username: String,
    pub title_text: String,
    pub custom_elements: Vec<CustomElement>,
}

pub fn title_text(status: &str) -> String {
    format!("Job changed to - {status}")
}

pub fn build_monitoring_payload(
    detail: &JobStatusDetail,
    classification: Classification,
) -> Result<MonitoringPayload> {
    Ok(MonitoringPayload {
        severity: classification.severity,
        notification_type: classification.notification_type,
        slack_username: SLACK_USERNAME.to_string(),
        title_text: title_text(&detail.status),
        custom_elements: build_custom_elements(detail)?,
    })
}
