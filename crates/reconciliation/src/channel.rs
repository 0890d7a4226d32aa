//! Channel configuration lookup used by the webhook use cases.

use common::ChannelId;
use store::{ChannelConfig, ChannelConfigRepo, RecordScope};

use crate::response::WebhookRejection;

/// Resolves the gateway configuration for a channel.
///
/// A missing configuration and a failed lookup are both reported as
/// [`WebhookRejection::AppIsNotConfigured`]: there is nothing this app can do
/// with the event either way.
pub async fn load_channel_config<R>(
    repo: &R,
    scope: &RecordScope,
    channel_id: &ChannelId,
) -> Result<ChannelConfig, WebhookRejection>
where
    R: ChannelConfigRepo + ?Sized,
{
    match repo.get_channel_config(scope, channel_id).await {
        Ok(Some(config)) => Ok(config),
        Ok(None) => {
            tracing::warn!(%channel_id, "no gateway configuration assigned to channel");
            Err(WebhookRejection::AppIsNotConfigured)
        }
        Err(error) => {
            tracing::error!(%channel_id, %error, "failed to load channel configuration");
            Err(WebhookRejection::AppIsNotConfigured)
        }
    }
}
