// src/notify/elements.rs

use chrono::DateTime;
use serde::Serialize;

use crate::errors::{RelayError, Result};
use crate::event::JobStatusDetail;

pub const JOB_NAME_LABEL: &str = "Job name";
pub const JOB_QUEUE_LABEL: &str = "Job queue";
pub const CREATED_AT_LABEL: &str = "Created at";
pub const STARTED_AT_LABEL: &str = "Started at";
pub const STOPPED_AT_LABEL: &str = "Stopped at";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One key/value line shown under a monitoring message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomElement {
    pub key: String,
    pub value: String,
}

impl CustomElement {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Job name and queue, then whichever of created/started/stopped are present,
/// always in that order.
pub fn build_custom_elements(detail: &JobStatusDetail) -> Result<Vec<CustomElement>> {
    let mut elements = vec![
        CustomElement::new(JOB_NAME_LABEL, detail.job_name.as_str()),
        CustomElement::new(JOB_QUEUE_LABEL, detail.job_queue.as_str()),
    ];

    let instants = [
        (CREATED_AT_LABEL, detail.created_at),
        (STARTED_AT_LABEL, detail.started_at),
        (STOPPED_AT_LABEL, detail.stopped_at),
    ];
    for (label, millis) in instants {
        if let Some(ms) = millis {
            elements.push(CustomElement::new(label, format_epoch_millis(ms)?));
        }
    }

    Ok(elements)
}

/// Render epoch milliseconds as `YYYY-MM-DDTHH:MM:SS` (UTC, sub-second
/// part dropped).
pub fn format_epoch_millis(millis: i64) -> Result<String> {
    let instant = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        RelayError::ValidationFailed(format!("timestamp {millis} is out of range"))
    })?;
    Ok(instant.format(TIMESTAMP_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> JobStatusDetail {
        JobStatusDetail {
            job_name: "test job".into(),
            status: "FAILED".into(),
            job_queue: "test/pdm_object_tagger".into(),
            created_at: None,
            started_at: None,
            stopped_at: None,
            status_reason: None,
        }
    }

    #[test]
    fn formats_epoch_millis() {
        assert_eq!(format_epoch_millis(1613642621525).unwrap(), "2021-02-18T10:03:41");
    }

    #[test]
    fn all_timestamps_in_order() {
        let mut d = detail();
        d.created_at = Some(1613642621525);
        d.started_at = Some(1613642730217);
        d.stopped_at = Some(1613642732819);

        assert_eq!(
            build_custom_elements(&d).unwrap(),
            vec![
                CustomElement::new("Job name", "test job"),
                CustomElement::new("Job queue", "test/pdm_object_tagger"),
                CustomElement::new("Created at", "2021-02-18T10:03:41"),
                CustomElement::new("Started at", "2021-02-18T10:05:30"),
                CustomElement::new("Stopped at", "2021-02-18T10:05:32"),
            ]
        );
    }

    #[test]
    fn absent_timestamps_are_skipped() {
        let mut d = detail();
        d.stopped_at = Some(1613642732819);

        let keys: Vec<_> = build_custom_elements(&d)
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["Job name", "Job queue", "Stopped at"]);
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        assert!(format_epoch_millis(i64::MAX).is_err());
    }
}
