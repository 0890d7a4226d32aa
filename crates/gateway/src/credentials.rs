//! Merchant credentials used to build a gateway client.

use common::Secret;
use serde::{Deserialize, Serialize};

/// Which gateway deployment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl GatewayEnvironment {
    /// Maps a channel's sandbox flag to an environment.
    pub fn from_sandbox_flag(use_sandbox: bool) -> Self {
        if use_sandbox {
            GatewayEnvironment::Sandbox
        } else {
            GatewayEnvironment::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayEnvironment::Sandbox => "sandbox",
            GatewayEnvironment::Production => "production",
        }
    }
}

impl std::fmt::Display for GatewayEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a client needs to authenticate against the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCredentials {
    pub terminal_id: String,
    pub merchant_code: String,
    pub secret_code: Secret<String>,
    pub environment: GatewayEnvironment,
}
