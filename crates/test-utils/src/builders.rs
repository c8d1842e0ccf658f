#![allow(dead_code)]

use emr_relauncher::config::{NotifierSettings, RawSettings, RelaunchSettings};
use emr_relauncher::relaunch::ClusterFailureRecord;
use serde_json::{json, Value};

pub const SNS_TOPIC_ARN: &str = "test-sns-topic-arn";
pub const TABLE_NAME: &str = "data_pipeline_metadata";
pub const PDM_JOB_QUEUE: &str = "test/pdm_object_tagger";
pub const OTHER_JOB_QUEUE: &str = "test_queue";
pub const JOB_NAME: &str = "test job";

/// Builder for `ClusterFailureRecord`, defaulting to the canonical test row.
pub struct RecordBuilder {
    record: ClusterFailureRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            record: ClusterFailureRecord {
                correlation_id: "test_correlation_id".to_string(),
                data_product: "PDM".to_string(),
                current_step: "transform".to_string(),
                cluster_id: "test_cluster_id".to_string(),
                run_id: 1,
                s3_prefix: Some("test_s3_prefix".to_string()),
                s3_prefix_analytical_dataset: None,
                s3_prefix_snapshots: None,
                snapshot_type: None,
                export_date: None,
            },
        }
    }

    pub fn correlation_id(mut self, id: &str) -> Self {
        self.record.correlation_id = id.to_string();
        self
    }

    pub fn data_product(mut self, product: &str) -> Self {
        self.record.data_product = product.to_string();
        self
    }

    pub fn current_step(mut self, step: &str) -> Self {
        self.record.current_step = step.to_string();
        self
    }

    pub fn cluster_id(mut self, id: &str) -> Self {
        self.record.cluster_id = id.to_string();
        self
    }

    pub fn run_id(mut self, run_id: i64) -> Self {
        self.record.run_id = run_id;
        self
    }

    pub fn s3_prefix(mut self, prefix: Option<&str>) -> Self {
        self.record.s3_prefix = prefix.map(str::to_string);
        self
    }

    pub fn analytical(mut self, analytical: &str, snapshots: &str, snapshot_type: &str, date: &str) -> Self {
        self.record.s3_prefix_analytical_dataset = Some(analytical.to_string());
        self.record.s3_prefix_snapshots = Some(snapshots.to_string());
        self.record.snapshot_type = Some(snapshot_type.to_string());
        self.record.export_date = Some(date.to_string());
        self
    }

    pub fn build(self) -> ClusterFailureRecord {
        self.record
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the SNS-wrapped job state-change event.
pub struct JobEventBuilder {
    detail: serde_json::Map<String, Value>,
}

impl JobEventBuilder {
    pub fn new(status: &str, queue: &str) -> Self {
        let mut detail = serde_json::Map::new();
        detail.insert("jobName".into(), json!(JOB_NAME));
        detail.insert("status".into(), json!(status));
        detail.insert("jobQueue".into(), json!(queue));
        Self { detail }
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.detail.insert(key.to_string(), value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.detail.remove(key);
        self
    }

    pub fn build(self) -> Value {
        let message = json!({ "detail": Value::Object(self.detail) });
        json!({ "Records": [{ "Sns": { "Message": message.to_string() } }] })
    }
}

/// Cluster state-change event as delivered by the event bus.
pub fn cluster_event(cluster_id: &str) -> Value {
    json!({
        "detail": {
            "severity": "CRITICAL",
            "stateChangeReason": "{\"code\":\"STEP_FAILURE\",\"message\":\"Shut down as step failed\"}",
            "name": "pdm-dataset-generator",
            "clusterId": cluster_id,
            "state": "TERMINATED_WITH_ERRORS",
            "message": "Amazon EMR Cluster j-1A6KVTAXNFCW0 (pdm-dataset-generator) has terminated with errors"
        }
    })
}

/// Raw settings with the topic and table set and everything else defaulted.
pub fn raw_settings() -> RawSettings {
    RawSettings {
        sns_topic: Some(SNS_TOPIC_ARN.to_string()),
        table_name: Some(TABLE_NAME.to_string()),
        ..RawSettings::default()
    }
}

pub fn relaunch_settings(raw: RawSettings) -> RelaunchSettings {
    RelaunchSettings::try_from(&raw).expect("valid relaunch settings")
}

pub fn notifier_settings(raw: RawSettings) -> NotifierSettings {
    NotifierSettings::try_from(&raw).expect("valid notifier settings")
}
