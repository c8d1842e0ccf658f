// src/outcome.rs

//! Successful terminal states of one invocation.

use std::fmt;

use crate::relaunch::policy::IneligibleReason;

/// How an invocation ended when nothing went wrong.
///
/// Fatal paths (bad configuration, invalid event, transport failure) are
/// [`RelayError`](crate::errors::RelayError) values instead, so a caller
/// can always tell "deliberately did nothing" apart from "failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exactly one message was published.
    Published {
        topic: String,
        message_id: Option<String>,
    },
    /// No record exists for the cluster; nothing to relaunch.
    SkippedNoRecord { cluster_id: String },
    /// A record exists but the retry policy refuses a relaunch.
    SkippedIneligible {
        cluster_id: String,
        reason: IneligibleReason,
    },
    /// The job status is in the ignore-set.
    Ignored { status: String },
}

impl Outcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Outcome::Published { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Published { .. } => "published",
            Outcome::SkippedNoRecord { .. } => "skipped_no_record",
            Outcome::SkippedIneligible { .. } => "skipped_ineligible",
            Outcome::Ignored { .. } => "ignored",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Published { topic, message_id } => match message_id {
                Some(id) => write!(f, "published to {topic} (message id {id})"),
                None => write!(f, "published to {topic}"),
            },
            Outcome::SkippedNoRecord { cluster_id } => {
                write!(f, "no record for cluster {cluster_id}; not relaunching")
            }
            Outcome::SkippedIneligible { cluster_id, reason } => match reason {
                IneligibleReason::StepExcluded { step } => write!(
                    f,
                    "cluster {cluster_id} failed in step {step}, which is not retried"
                ),
                IneligibleReason::RetriesExhausted {
                    run_id,
                    max_retry_count,
                } => write!(
                    f,
                    "cluster {cluster_id} is on run {run_id}, above the retry limit {max_retry_count}"
                ),
            },
            Outcome::Ignored { status } => write!(f, "job status {status} is ignored"),
        }
    }
}
