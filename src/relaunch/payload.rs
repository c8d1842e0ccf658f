// src/relaunch/payload.rs

use serde::Serialize;

use crate::errors::{RelayError, Result};
use crate::relaunch::record::ClusterFailureRecord;
use crate::types::PayloadShape;

/// Data products whose relaunch reads from the analytical dataset prefix
/// rather than the snapshots prefix.
pub const ANALYTICAL_PREFIX_DATA_PRODUCTS: [&str; 2] = ["PDM", "CLIVE"];

/// Message asking the cluster launcher to start a new run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelaunchPayload {
    pub correlation_id: String,
    pub s3_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
}

/// Build the relaunch payload for `record` in the deployment's shape.
///
/// Fails if the record lacks an attribute that the shape needs.
pub fn build_relaunch_payload(
    record: &ClusterFailureRecord,
    shape: PayloadShape,
) -> Result<RelaunchPayload> {
    match shape {
        PayloadShape::Minimal => Ok(RelaunchPayload {
            correlation_id: record.correlation_id.clone(),
            s3_prefix: required(&record.s3_prefix, "S3_Prefix", record)?,
            snapshot_type: None,
            export_date: None,
        }),
        PayloadShape::Analytical => {
            let s3_prefix = if uses_analytical_prefix(&record.data_product) {
                required(
                    &record.s3_prefix_analytical_dataset,
                    "S3_Prefix_Analytical_DataSet",
                    record,
                )?
            } else {
                required(&record.s3_prefix_snapshots, "S3_Prefix_Snapshots", record)?
            };

            Ok(RelaunchPayload {
                correlation_id: record.correlation_id.clone(),
                s3_prefix,
                snapshot_type: Some(required(&record.snapshot_type, "Snapshot_Type", record)?),
                export_date: Some(required(&record.export_date, "Date", record)?),
            })
        }
    }
}

pub fn uses_analytical_prefix(data_product: &str) -> bool {
    ANALYTICAL_PREFIX_DATA_PRODUCTS.contains(&data_product)
}

fn required(value: &Option<String>, attribute: &str, record: &ClusterFailureRecord) -> Result<String> {
    value.clone().ok_or_else(|| {
        RelayError::ValidationFailed(format!(
            "record for correlation id {} has no {attribute} attribute",
            record.correlation_id
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(data_product: &str) -> ClusterFailureRecord {
        ClusterFailureRecord {
            correlation_id: "c1".into(),
            data_product: data_product.into(),
            current_step: "transform".into(),
            cluster_id: "cid1".into(),
            run_id: 1,
            s3_prefix: Some("p1".into()),
            s3_prefix_analytical_dataset: Some("analytical/prefix".into()),
            s3_prefix_snapshots: Some("snapshots/prefix".into()),
            snapshot_type: Some("full".into()),
            export_date: Some("2021-02-18".into()),
        }
    }

    #[test]
    fn minimal_payload_serializes_two_fields() {
        let payload = build_relaunch_payload(&record("PDM"), PayloadShape::Minimal).unwrap();
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"correlation_id":"c1","s3_prefix":"p1"}"#
        );
    }

    #[test]
    fn analytical_payload_picks_prefix_by_data_product() {
        let pdm = build_relaunch_payload(&record("PDM"), PayloadShape::Analytical).unwrap();
        assert_eq!(pdm.s3_prefix, "analytical/prefix");
        assert_eq!(pdm.snapshot_type.as_deref(), Some("full"));
        assert_eq!(pdm.export_date.as_deref(), Some("2021-02-18"));

        let other = build_relaunch_payload(&record("UCFS"), PayloadShape::Analytical).unwrap();
        assert_eq!(other.s3_prefix, "snapshots/prefix");
    }

    #[test]
    fn missing_prefix_is_a_validation_failure() {
        let mut rec = record("PDM");
        rec.s3_prefix = None;
        let err = build_relaunch_payload(&rec, PayloadShape::Minimal).unwrap_err();
        assert!(matches!(err, RelayError::ValidationFailed(msg) if msg.contains("S3_Prefix")));
    }
}
