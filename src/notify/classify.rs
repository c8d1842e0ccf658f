// src/notify/classify.rs

//! (queue, status) → (severity, notification type).

use std::collections::BTreeSet;

use regex::Regex;

use crate::types::{NotificationType, Severity};

pub const FAILED_STATUS: &str = "FAILED";
pub const SUCCEEDED_STATUS: &str = "SUCCEEDED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub notification_type: NotificationType,
}

/// Deployment rules for job notifications.
#[derive(Debug, Clone)]
pub struct ClassificationRules {
    /// Matched anywhere in the job queue name or ARN.
    pub high_priority_queue: Regex,
    /// Upper-case statuses that never produce a notification.
    pub ignored_statuses: BTreeSet<String>,
}

impl ClassificationRules {
    pub fn is_high_priority(&self, job_queue: &str) -> bool {
        self.high_priority_queue.is_match(job_queue)
    }

    pub fn is_ignored(&self, status: &str) -> bool {
        self.ignored_statuses.contains(&status.trim().to_uppercase())
    }

    pub fn classify(&self, job_queue: &str, status: &str) -> Classification {
        classify(self.is_high_priority(job_queue), status)
    }
}

/// The rule table. Failure is checked first, then queue priority; unknown
/// statuses fall through to medium information.
pub fn classify(high_priority_queue: bool, status: &str) -> Classification {
    let status = status.trim().to_uppercase();

    let (severity, notification_type) = match status.as_str() {
        FAILED_STATUS if high_priority_queue => (Severity::Critical, NotificationType::Error),
        FAILED_STATUS => (Severity::High, NotificationType::Warning),
        SUCCEEDED_STATUS => (Severity::High, NotificationType::Information),
        _ => (Severity::Medium, NotificationType::Information),
    };

    Classification {
        severity,
        notification_type,
    }
}
