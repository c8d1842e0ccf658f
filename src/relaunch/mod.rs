// src/relaunch/mod.rs

//! Cluster-relaunch decider.
//!
//! A terminated cluster is looked up in the pipeline metadata store; if the
//! failed step is retryable and the attempt counter allows it, a relaunch
//! request is published.
//!
//! The pure parts ([`policy`], [`payload`]) have no IO and are unit tested
//! directly; [`handler`] wires them to a [`RecordStore`](crate::services::RecordStore)
//! and a [`Publisher`](crate::services::Publisher).

pub mod handler;
pub mod payload;
pub mod policy;
pub mod record;

pub use handler::handle_relaunch;
pub use payload::{build_relaunch_payload, RelaunchPayload};
pub use policy::{Eligibility, IneligibleReason, RetryPolicy};
pub use record::{records_from_rows, ClusterFailureRecord};
