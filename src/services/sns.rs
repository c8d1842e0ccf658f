// src/services/sns.rs

//! SNS-backed [`Publisher`].

use aws_config::SdkConfig;
use aws_sdk_sns::error::ProvideErrorMetadata;
use aws_sdk_sns::Client;
use tracing::info;

use super::{BoxFuture, Publisher, Receipt};
use crate::errors::{RelayError, Result};

#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    async fn send(&self, topic: &str, message: &str) -> Result<Receipt> {
        let response = self
            .client
            .publish()
            .topic_arn(topic)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                RelayError::PublishError(format!(
                    "publishing to {topic} ({}): {}",
                    e.code().unwrap_or_default(),
                    e.message().unwrap_or_default()
                ))
            })?;

        let receipt = Receipt {
            message_id: response.message_id().map(str::to_string),
        };
        info!(topic, message_id = ?receipt.message_id, "response from topic");
        Ok(receipt)
    }
}

impl Publisher for SnsPublisher {
    fn publish<'a>(&'a self, topic: &'a str, message: &'a str) -> BoxFuture<'a, Result<Receipt>> {
        Box::pin(self.send(topic, message))
    }
}
