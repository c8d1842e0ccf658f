use std::sync::atomic::{AtomicUsize, Ordering};

use emr_relauncher::errors::{RelayError, Result};
use emr_relauncher::relaunch::ClusterFailureRecord;
use emr_relauncher::services::{BoxFuture, Publisher, Receipt, RecordStore};

/// A publisher whose transport always fails, counting the attempts.
#[derive(Debug, Default)]
pub struct FailingPublisher {
    attempts: AtomicUsize,
}

impl FailingPublisher {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Publisher for FailingPublisher {
    fn publish<'a>(&'a self, topic: &'a str, _message: &'a str) -> BoxFuture<'a, Result<Receipt>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            Err(RelayError::PublishError(format!("{topic}: service unavailable")))
        })
    }
}

/// A record store whose scans always fail.
#[derive(Debug, Default)]
pub struct FailingRecordStore;

impl RecordStore for FailingRecordStore {
    fn scan_by_cluster_id<'a>(
        &'a self,
        cluster_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<ClusterFailureRecord>>> {
        Box::pin(async move {
            Err(RelayError::StoreError(format!("scan for {cluster_id}: throttled")))
        })
    }
}
