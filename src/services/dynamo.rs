// src/services/dynamo.rs

//! DynamoDB-backed [`RecordStore`].

use std::collections::HashMap;

use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::ProvideErrorMetadata;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_json::{Map, Number, Value};
use tracing::{debug, info};

use super::{BoxFuture, RecordStore};
use crate::errors::{RelayError, Result};
use crate::relaunch::record::{records_from_rows, ClusterFailureRecord};

const CLUSTER_ID_ATTRIBUTE: &str = "Cluster_Id";

#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: Client,
    table_name: String,
}

impl DynamoRecordStore {
    pub fn new(config: &SdkConfig, table_name: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            table_name: table_name.into(),
        }
    }

    async fn scan(&self, cluster_id: &str) -> Result<Vec<ClusterFailureRecord>> {
        let mut rows = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        let mut pages = 0usize;

        // A filtered scan applies the filter per page, so keep paging until
        // the table is exhausted or matches could be missed.
        loop {
            let response = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression(format!("{CLUSTER_ID_ATTRIBUTE} = :cluster_id"))
                .expression_attribute_values(":cluster_id", AttributeValue::S(cluster_id.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| {
                    RelayError::StoreError(format!(
                        "scanning table {} for {CLUSTER_ID_ATTRIBUTE} {cluster_id} ({}): {}",
                        self.table_name,
                        e.code().unwrap_or_default(),
                        e.message().unwrap_or_default()
                    ))
                })?;
            pages += 1;

            rows.extend(response.items().iter().map(item_to_json));

            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!(pages, rows = rows.len(), "completed filtered scan");
        let records = records_from_rows(rows)?;
        info!(
            table = %self.table_name,
            cluster_id,
            matches = records.len(),
            "response from record store"
        );
        Ok(records)
    }
}

impl RecordStore for DynamoRecordStore {
    fn scan_by_cluster_id<'a>(
        &'a self,
        cluster_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClusterFailureRecord>>> {
        Box::pin(self.scan(cluster_id))
    }
}

/// JSON form of a DynamoDB item, in the shape the record's serde model reads.
fn item_to_json(item: &HashMap<String, AttributeValue>) -> Value {
    let mut object = Map::new();
    for (name, value) in item {
        if let Some(json) = attribute_to_json(value) {
            object.insert(name.clone(), json);
        }
    }
    Value::Object(object)
}

/// Scalar attributes only; sets, maps and lists are not part of the record.
fn attribute_to_json(value: &AttributeValue) -> Option<Value> {
    match value {
        AttributeValue::S(s) => Some(Value::String(s.clone())),
        AttributeValue::N(n) => n
            .parse::<i64>()
            .map(Number::from)
            .ok()
            .or_else(|| n.parse::<f64>().ok().and_then(Number::from_f64))
            .map(Value::Number),
        AttributeValue::Bool(b) => Some(Value::Bool(*b)),
        AttributeValue::Null(_) => Some(Value::Null),
        _ => None,
    }
}
