// src/event/cluster.rs

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{RelayError, Result};

/// Cluster state-change notice, e.g. `TERMINATED_WITH_ERRORS`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterTerminationEvent {
    pub detail: ClusterStateDetail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStateDetail {
    pub cluster_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub state_change_reason: Option<String>,
}

impl ClusterTerminationEvent {
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| {
            RelayError::ValidationFailed(format!("cluster state-change event: {e}"))
        })
    }

    pub fn cluster_id(&self) -> &str {
        &self.detail.cluster_id
    }
}
