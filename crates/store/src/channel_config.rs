//! Per-channel gateway configuration.

use common::{Secret, ShippingCompanyCode};
use gateway::{GatewayCredentials, GatewayEnvironment};
use serde::{Deserialize, Serialize};

/// Gateway settings for one sales channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Display name shown to the merchant.
    pub name: String,
    pub merchant_code: String,
    pub terminal_id: String,
    pub secret_code: Secret<String>,
    pub use_sandbox: bool,
    /// Carrier code reported when the fulfillment carries none.
    pub shipping_company_code: ShippingCompanyCode,
    /// Report goods by SKU instead of product name.
    pub sku_as_name: bool,
}

impl ChannelConfig {
    /// Credentials for building a gateway client for this channel.
    pub fn credentials(&self) -> GatewayCredentials {
        GatewayCredentials {
            terminal_id: self.terminal_id.clone(),
            merchant_code: self.merchant_code.clone(),
            secret_code: self.secret_code.clone(),
            environment: GatewayEnvironment::from_sandbox_flag(self.use_sandbox),
        }
    }
}
