//! Contract for the external deferred-payment gateway.
//!
//! The gateway keeps its own transaction state and must be told explicitly
//! about shipments and refunds. This crate defines:
//! - the [`GatewayClient`] capability and the [`GatewayClientFactory`] that
//!   builds a client from a channel's credentials
//! - the wire payloads and success responses, using the gateway's field names
//! - [`GatewayError`], the typed failure every call can return
//! - an in-memory client that records calls, for tests and local runs
//!
//! HTTP transport and request signing live behind the trait and are not part
//! of this crate.

pub mod client;
pub mod credentials;
pub mod error;
pub mod memory;
pub mod payloads;
pub mod responses;

pub use client::{GatewayClient, GatewayClientFactory, RequestOptions};
pub use credentials::{GatewayCredentials, GatewayEnvironment};
pub use error::GatewayError;
pub use memory::{GatewayCall, InMemoryGatewayClient, InMemoryGatewayClientFactory};
pub use payloads::{
    CancelTransactionPayload, ChangeTransactionPayload, FulfillmentReportPayload, Goods,
};
pub use responses::{
    CancelTransactionSuccess, ChangeTransactionResult, ChangeTransactionSuccess,
    FulfillmentReportSuccess, TransactionResult,
};
