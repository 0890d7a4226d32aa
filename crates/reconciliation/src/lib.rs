//! Fulfillment and refund reconciliation with the deferred-payment gateway.
//!
//! The commerce platform emits order lifecycle events; the gateway must be
//! told explicitly about each shipment and refund. This crate turns the
//! platform's webhooks into gateway calls:
//! 1. Validate the event and check this app installation owns the transaction
//! 2. Resolve the channel's gateway configuration
//! 3. Issue the gateway call (report fulfillment, change or cancel)
//! 4. Record the outcome in the transaction record store
//!
//! Gateway rejections are business outcomes and come back as `Ok` responses;
//! [`WebhookRejection`] is reserved for events that could not be processed.

pub mod channel;
pub mod config_setup;
pub mod events;
pub mod fulfillment;
pub mod refund;
pub mod response;
pub mod validation;

pub use config_setup::{ChannelConfigSetup, ConfigSetupError, NewChannelConfigInput};
pub use events::{FulfillmentTrackingNumberUpdatedEvent, TransactionRefundRequestedEvent};
pub use fulfillment::FulfillmentTrackingUseCase;
pub use refund::{ParsedRefundEvent, RefundStrategy, TransactionRefundRequestedUseCase};
pub use response::{
    FulfillmentTrackingResponse, MalformedReason, RefundFailureResult, RefundResponse,
    RefundSuccessResult, TransactionResultPayload, TransactionResultType, WebhookRejection,
};
