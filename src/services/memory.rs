// src/services/memory.rs

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use super::{BoxFuture, Publisher, Receipt, RecordStore};
use crate::errors::Result;
use crate::relaunch::record::ClusterFailureRecord;

/// Record store backed by a vector, scanned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<Mutex<Vec<ClusterFailureRecord>>>,
}

impl MemoryRecordStore {
    pub fn new(records: Vec<ClusterFailureRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn insert(&self, record: ClusterFailureRecord) {
        lock(&self.records).push(record);
    }
}

impl RecordStore for MemoryRecordStore {
    fn scan_by_cluster_id<'a>(
        &'a self,
        cluster_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClusterFailureRecord>>> {
        let matches: Vec<ClusterFailureRecord> = lock(&self.records)
            .iter()
            .filter(|r| r.cluster_id == cluster_id)
            .cloned()
            .collect();

        Box::pin(async move { Ok(matches) })
    }
}

/// One message captured by [`RecordingPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub message: String,
}

/// Publisher that keeps every message in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    published: Arc<Mutex<Vec<PublishedMessage>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first.
    pub fn messages(&self) -> Vec<PublishedMessage> {
        lock(&self.published).clone()
    }
}

impl Publisher for RecordingPublisher {
    fn publish<'a>(&'a self, topic: &'a str, message: &'a str) -> BoxFuture<'a, Result<Receipt>> {
        let receipt = {
            let mut published = lock(&self.published);
            published.push(PublishedMessage {
                topic: topic.to_string(),
                message: message.to_string(),
            });
            Receipt {
                message_id: Some(format!("local-{}", published.len())),
            }
        };

        Box::pin(async move { Ok(receipt) })
    }
}

/// Publisher for `--dry-run`: logs the message and sends nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunPublisher;

impl Publisher for DryRunPublisher {
    fn publish<'a>(&'a self, topic: &'a str, message: &'a str) -> BoxFuture<'a, Result<Receipt>> {
        Box::pin(async move {
            info!(topic, payload = message, "dry-run: message not published");
            Ok(Receipt::default())
        })
    }
}

// A panic while holding one of these locks cannot leave the vector half
// written, so a poisoned lock is still safe to read.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
