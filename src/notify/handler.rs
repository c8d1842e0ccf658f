// src/notify/handler.rs

use serde_json::Value;
use tracing::{error, info};

use crate::config::NotifierSettings;
use crate::errors::Result;
use crate::event::JobStatusDetail;
use crate::logging::display_json;
use crate::notify::payload::build_monitoring_payload;
use crate::outcome::Outcome;
use crate::publish::publish_payload;
use crate::services::Publisher;

/// Handle one SNS-wrapped job state-change event.
///
/// Fatal errors are logged here before they are returned.
pub async fn handle_job_status<P>(
    event: &Value,
    settings: &NotifierSettings,
    publisher: &P,
) -> Result<Outcome>
where
    P: Publisher + ?Sized,
{
    let result = classify_and_publish(event, settings, publisher).await;
    if let Err(e) = &result {
        error!(kind = e.kind(), error = %e, "exception occurred for invocation");
    }
    result
}

async fn classify_and_publish<P>(
    event: &Value,
    settings: &NotifierSettings,
    publisher: &P,
) -> Result<Outcome>
where
    P: Publisher + ?Sized,
{
    info!(event = %display_json(event), "job state-change notification");

    let detail = JobStatusDetail::from_sns_envelope(event)?;
    info!(
        job_name = %detail.job_name,
        job_status = %detail.status,
        job_queue = %detail.job_queue,
        status_reason = ?detail.status_reason,
        "job details validated"
    );

    if settings.rules.is_ignored(&detail.status) {
        info!(job_status = %detail.status, "exiting normally as job status is ignored");
        return Ok(Outcome::Ignored {
            status: detail.status,
        });
    }

    let classification = settings.rules.classify(&detail.job_queue, &detail.status);
    info!(
        severity = %classification.severity,
        notification_type = %classification.notification_type,
        "classified job status"
    );

    let payload = build_monitoring_payload(&detail, classification)?;
    publish_payload(publisher, &settings.sns_topic, &payload).await
}
