// src/notify/mod.rs

//! Job-status notifier: turns a batch job state change into a monitoring
//! message with a severity and notification type.

pub mod classify;
pub mod elements;
pub mod handler;
pub mod payload;

pub use classify::{classify, Classification, ClassificationRules};
pub use elements::{build_custom_elements, format_epoch_millis, CustomElement};
pub use handler::handle_job_status;
pub use payload::{build_monitoring_payload, MonitoringPayload};
