//! Creating a channel's gateway configuration.

use common::{ChannelId, Secret, ShippingCompanyCode};
use gateway::{GatewayClient, GatewayClientFactory, GatewayError};
use serde::Deserialize;
use store::{ChannelConfig, ChannelConfigRepo, ConfigRepoError, RecordScope};
use thiserror::Error;

/// Configuration submitted by the merchant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChannelConfigInput {
    pub name: String,
    pub merchant_code: String,
    pub terminal_id: String,
    pub secret_code: Secret<String>,
    #[serde(default)]
    pub use_sandbox: bool,
    pub shipping_company_code: String,
    #[serde(default)]
    pub sku_as_name: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigSetupError {
    #[error("Invalid configuration: {field} must not be empty")]
    Invalid { field: &'static str },

    #[error("Gateway rejected the credentials: {0}")]
    CredentialsRejected(GatewayError),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(#[from] ConfigRepoError),
}

fn required(field: &'static str, value: &str) -> Result<String, ConfigSetupError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigSetupError::Invalid { field });
    }
    Ok(trimmed.to_string())
}

impl NewChannelConfigInput {
    /// Checks required fields and trims them.
    pub fn validate(&self) -> Result<ChannelConfig, ConfigSetupError> {
        let name = required("name", &self.name)?;
        let merchant_code = required("merchantCode", &self.merchant_code)?;
        let terminal_id = required("terminalId", &self.terminal_id)?;
        let secret_code = required("secretCode", self.secret_code.reveal())?;
        let shipping_company_code = required("shippingCompanyCode", &self.shipping_company_code)?;

        Ok(ChannelConfig {
            name,
            merchant_code,
            terminal_id,
            secret_code: Secret::new(secret_code),
            use_sandbox: self.use_sandbox,
            shipping_company_code: ShippingCompanyCode::new(shipping_company_code),
            sku_as_name: self.sku_as_name,
        })
    }
}

/// Validates, verifies and stores channel configurations.
pub struct ChannelConfigSetup<C, F> {
    config_repo: C,
    client_factory: F,
}

impl<C, F> ChannelConfigSetup<C, F>
where
    C: ChannelConfigRepo,
    F: GatewayClientFactory,
{
    pub fn new(config_repo: C, client_factory: F) -> Self {
        Self {
            config_repo,
            client_factory,
        }
    }

    /// Stores the configuration once the gateway accepts its credentials.
    #[tracing::instrument(skip(self, input), fields(app_id = %scope.app_id))]
    pub async fn create_config(
        &self,
        scope: &RecordScope,
        channel_id: &ChannelId,
        input: NewChannelConfigInput,
    ) -> Result<ChannelConfig, ConfigSetupError> {
        let config = input.validate().inspect_err(|error| {
            tracing::warn!(%error, "rejecting channel configuration");
        })?;

        let client = self.client_factory.create(config.credentials());
        client.verify_credentials().await.map_err(|error| {
            tracing::warn!(%error, "gateway rejected channel credentials");
            ConfigSetupError::CredentialsRejected(error)
        })?;

        self.config_repo
            .save_channel_config(scope, channel_id, config.clone())
            .await
            .inspect_err(|error| {
                tracing::error!(%error, "failed to save channel configuration");
            })?;

        tracing::info!(name = %config.name, "channel configuration saved");
        Ok(config)
    }
}
