// src/event/mod.rs

//! Inbound event shapes.
//!
//! Both parsers are strict: a missing required field is a
//! [`RelayError::ValidationFailed`](crate::errors::RelayError::ValidationFailed)
//! and nothing is defaulted.

pub mod cluster;
pub mod job;

pub use cluster::{ClusterStateDetail, ClusterTerminationEvent};
pub use job::JobStatusDetail;
