// src/publish.rs

//! Serialize-and-send step shared by both handlers.

use std::fmt::Debug;

use serde::Serialize;
use tracing::info;

use crate::errors::Result;
use crate::logging::display_json;
use crate::outcome::Outcome;
use crate::services::Publisher;

/// Serialize `payload` compactly and publish it once to `topic`.
///
/// The human-readable rendering is only used for the log line; the published
/// bytes are always the compact `serde_json` form.
pub async fn publish_payload<T, P>(publisher: &P, topic: &str, payload: &T) -> Result<Outcome>
where
    T: Serialize + Debug,
    P: Publisher + ?Sized,
{
    let message = serde_json::to_string(payload)?;

    info!(
        topic,
        payload = %display_json(payload),
        "publishing payload"
    );

    let receipt = publisher.publish(topic, &message).await?;

    Ok(Outcome::Published {
        topic: topic.to_string(),
        message_id: receipt.message_id,
    })
}
