// src/relaunch/record.rs

//! Pipeline metadata record describing a failed cluster run.
//!
//! Rows are written by the upstream pipeline; this crate only reads them. The
//! attribute names are the table's own, so the serde renames below are the
//! wire format for both the key-value store and local JSON fixtures.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::{RelayError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterFailureRecord {
    #[serde(rename = "Correlation_Id")]
    pub correlation_id: String,

    #[serde(rename = "DataProduct")]
    pub data_product: String,

    /// The step the cluster was executing when it terminated.
    #[serde(rename = "CurrentStep")]
    pub current_step: String,

    #[serde(rename = "Cluster_Id")]
    pub cluster_id: String,

    /// Attempt counter maintained by the upstream pipeline (first run is 1).
    #[serde(rename = "Run_Id", deserialize_with = "number_or_numeric_string")]
    pub run_id: i64,

    #[serde(rename = "S3_Prefix", default, skip_serializing_if = "Option::is_none")]
    pub s3_prefix: Option<String>,

    #[serde(
        rename = "S3_Prefix_Analytical_DataSet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub s3_prefix_analytical_dataset: Option<String>,

    #[serde(
        rename = "S3_Prefix_Snapshots",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub s3_prefix_snapshots: Option<String>,

    #[serde(rename = "Snapshot_Type", default, skip_serializing_if = "Option::is_none")]
    pub snapshot_type: Option<String>,

    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<String>,
}

/// Decode the rows that matched one cluster id, in scan order.
///
/// Only the first row drives the relaunch decision, so it must decode. Later
/// rows that do not are logged and skipped.
pub fn records_from_rows<I>(rows: I) -> Result<Vec<ClusterFailureRecord>>
where
    I: IntoIterator<Item = Value>,
{
    let mut records = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<ClusterFailureRecord>(row) {
            Ok(record) => records.push(record),
            Err(e) if index == 0 => {
                return Err(RelayError::ValidationFailed(format!(
                    "malformed pipeline metadata record: {e}"
                )));
            }
            Err(e) => warn!(row = index, error = %e, "skipping malformed pipeline metadata record"),
        }
    }
    Ok(records)
}

/// Accept `1`, `1.0` or `"1"`: the table has held all three over time.
fn number_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Float(f) if f.fract() == 0.0 => Ok(f as i64),
        Raw::Float(f) => Err(de::Error::custom(format!("Run_Id is not an integer: {f}"))),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| de::Error::custom(format!("Run_Id {s:?} is not an integer: {e}"))),
    }
}
