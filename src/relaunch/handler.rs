// src/relaunch/handler.rs

//! IO shell around the relaunch decision.
//!
//! The steps are: read the cluster id, scan the store, evaluate the retry
//! policy on the first match, then publish. The publish is the only side
//! effect and happens only after every check has passed.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::RelaunchSettings;
use crate::errors::Result;
use crate::event::ClusterTerminationEvent;
use crate::logging::display_json;
use crate::outcome::Outcome;
use crate::publish::publish_payload;
use crate::relaunch::payload::build_relaunch_payload;
use crate::relaunch::policy::Eligibility;
use crate::services::{Publisher, RecordStore};

/// Handle one cluster state-change event.
///
/// Fatal errors are logged here before they are returned.
pub async fn handle_relaunch<S, P>(
    event: &Value,
    settings: &RelaunchSettings,
    store: &S,
    publisher: &P,
) -> Result<Outcome>
where
    S: RecordStore + ?Sized,
    P: Publisher + ?Sized,
{
    let result = decide_and_publish(event, settings, store, publisher).await;
    if let Err(e) = &result {
        error!(kind = e.kind(), error = %e, "exception occurred for invocation");
    }
    result
}

async fn decide_and_publish<S, P>(
    event: &Value,
    settings: &RelaunchSettings,
    store: &S,
    publisher: &P,
) -> Result<Outcome>
where
    S: RecordStore + ?Sized,
    P: Publisher + ?Sized,
{
    info!(event = %display_json(event), "cluster state-change event");

    let event = ClusterTerminationEvent::from_value(event)?;
    let cluster_id = event.cluster_id().to_string();
    info!(
        cluster_id = %cluster_id,
        name = ?event.detail.name,
        state = ?event.detail.state,
        state_change_reason = ?event.detail.state_change_reason,
        "cluster id"
    );

    let records = store.scan_by_cluster_id(&cluster_id).await?;

    let Some(record) = records.first() else {
        info!(
            table = %settings.table_name,
            cluster_id = %cluster_id,
            "no item found in record store for cluster id"
        );
        return Ok(Outcome::SkippedNoRecord { cluster_id });
    };
    if records.len() > 1 {
        warn!(
            cluster_id = %cluster_id,
            matches = records.len(),
            "several records share this cluster id; using the first"
        );
    }

    match settings.retry_policy.evaluate(record) {
        Eligibility::Eligible => {
            info!(
                failed_step = %record.current_step,
                run_id = record.run_id,
                "previous failed step is retryable, relaunching cluster"
            );
            let payload = build_relaunch_payload(record, settings.payload_shape)?;
            publish_payload(publisher, &settings.sns_topic, &payload).await
        }
        Eligibility::Ineligible(reason) => {
            info!(
                failed_step = %record.current_step,
                run_id = record.run_id,
                ?reason,
                "cluster not relaunching"
            );
            Ok(Outcome::SkippedIneligible { cluster_id, reason })
        }
    }
}
