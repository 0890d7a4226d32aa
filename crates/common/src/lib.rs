//! Shared types for the reconciliation workspace.
//!
//! Identifiers coming from the commerce platform and from the payment gateway
//! are wrapped in newtypes so they cannot be mixed up at call sites.

pub mod ids;
pub mod money;
pub mod secret;

pub use ids::{AppId, ChannelId, GatewayTransactionId, PlatformApiUrl, ShippingCompanyCode};
pub use money::Money;
pub use secret::Secret;
