// src/relaunch/policy.rs

//! Retry eligibility for a failed cluster.

use std::collections::BTreeSet;

use crate::relaunch::record::ClusterFailureRecord;

/// Deployment-supplied retry rules. Immutable for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Steps that must never be relaunched automatically.
    pub steps_not_to_retry: BTreeSet<String>,
    /// Highest `Run_Id` that may still be relaunched.
    pub max_retry_count: u32,
    /// When false, `max_retry_count` is ignored and only the step set applies.
    pub enforce_max_retry: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            steps_not_to_retry: BTreeSet::new(),
            max_retry_count: 1,
            enforce_max_retry: true,
        }
    }
}

/// Why a record was not relaunched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    StepExcluded { step: String },
    RetriesExhausted { run_id: i64, max_retry_count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Ineligible(IneligibleReason),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

impl RetryPolicy {
    /// Decide whether `record` may be relaunched.
    ///
    /// The step exclusion is checked first, so an excluded step is reported
    /// as such whatever its attempt counter says.
    pub fn evaluate(&self, record: &ClusterFailureRecord) -> Eligibility {
        if self.steps_not_to_retry.contains(&record.current_step) {
            return Eligibility::Ineligible(IneligibleReason::StepExcluded {
                step: record.current_step.clone(),
            });
        }

        if self.enforce_max_retry && record.run_id > i64::from(self.max_retry_count) {
            return Eligibility::Ineligible(IneligibleReason::RetriesExhausted {
                run_id: record.run_id,
                max_retry_count: self.max_retry_count,
            });
        }

        Eligibility::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(step: &str, run_id: i64) -> ClusterFailureRecord {
        ClusterFailureRecord {
            correlation_id: "c1".into(),
            data_product: "PDM".into(),
            current_step: step.into(),
            cluster_id: "cid1".into(),
            run_id,
            s3_prefix: Some("p1".into()),
            s3_prefix_analytical_dataset: None,
            s3_prefix_snapshots: None,
            snapshot_type: None,
            export_date: None,
        }
    }

    #[test]
    fn default_policy_allows_first_run() {
        assert!(RetryPolicy::default().evaluate(&record("transform", 1)).is_eligible());
    }

    #[test]
    fn excluded_step_wins_over_counter() {
        let policy = RetryPolicy {
            steps_not_to_retry: ["collect_metrics".to_string()].into(),
            max_retry_count: 10,
            enforce_max_retry: true,
        };
        assert_eq!(
            policy.evaluate(&record("collect_metrics", 1)),
            Eligibility::Ineligible(IneligibleReason::StepExcluded {
                step: "collect_metrics".into()
            })
        );
    }

    #[test]
    fn counter_above_max_is_ineligible() {
        let policy = RetryPolicy {
            max_retry_count: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(
            policy.evaluate(&record("transform", 1)),
            Eligibility::Ineligible(IneligibleReason::RetriesExhausted {
                run_id: 1,
                max_retry_count: 0
            })
        );
    }

    #[test]
    fn counter_is_ignored_when_enforcement_is_off() {
        let policy = RetryPolicy {
            max_retry_count: 0,
            enforce_max_retry: false,
            ..RetryPolicy::default()
        };
        assert!(policy.evaluate(&record("transform", 7)).is_eligible());
    }
}
