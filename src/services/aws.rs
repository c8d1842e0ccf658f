// src/services/aws.rs

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

use crate::config::AwsSettings;

/// Load the shared SDK configuration.
///
/// Credentials always come from the default provider chain; region and
/// profile are only overridden when the deployment sets them.
pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &settings.profile {
        loader = loader.profile_name(profile);
    }

    let config = loader.load().await;
    debug!(region = ?config.region(), "loaded AWS SDK configuration");
    config
}
