// src/services/mod.rs

//! External collaborators: the pipeline metadata store and the pub/sub topic.
//!
//! Handlers talk to a [`RecordStore`] and a [`Publisher`] instead of SDK
//! clients. This makes it easy to swap in in-memory fakes in tests while the
//! production adapters live in [`dynamo`] and [`sns`].
//!
//! - [`memory`] provides `MemoryRecordStore`, `RecordingPublisher` and
//!   `DryRunPublisher`, used for local runs and tests.
//! - [`aws`] builds the shared SDK configuration.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::relaunch::record::ClusterFailureRecord;

pub mod memory;

#[cfg(feature = "aws")]
pub mod aws;
#[cfg(feature = "aws")]
pub mod dynamo;
#[cfg(feature = "aws")]
pub mod sns;

pub use memory::{DryRunPublisher, MemoryRecordStore, PublishedMessage, RecordingPublisher};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only access to cluster failure records.
pub trait RecordStore: Send + Sync {
    /// All records whose `Cluster_Id` attribute equals `cluster_id`.
    ///
    /// This is a filtered scan: the table's primary key is a different
    /// composite, so implementations must not assume at most one match.
    fn scan_by_cluster_id<'a>(
        &'a self,
        cluster_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClusterFailureRecord>>>;
}

/// Acknowledgement returned by the transport for one publish call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    pub message_id: Option<String>,
}

/// Sends a text message to a topic.
pub trait Publisher: Send + Sync {
    fn publish<'a>(&'a self, topic: &'a str, message: &'a str) -> BoxFuture<'a, Result<Receipt>>;
}
