//! Gateway client capability.

use async_trait::async_trait;

use crate::credentials::GatewayCredentials;
use crate::error::GatewayError;
use crate::payloads::{CancelTransactionPayload, ChangeTransactionPayload, FulfillmentReportPayload};
use crate::responses::{CancelTransactionSuccess, ChangeTransactionSuccess, FulfillmentReportSuccess};

/// Per-request behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestOptions {
    /// Fail with [`GatewayError::MultipleResults`] when the gateway answers
    /// with more than one transaction result.
    pub reject_multiple_results: bool,
}

impl RequestOptions {
    /// Options for calls that address exactly one transaction.
    pub fn single_result() -> Self {
        Self {
            reject_multiple_results: true,
        }
    }
}

/// Operations offered by the deferred-payment gateway.
///
/// Implementations own transport, signing, timeouts and retries.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Reports that goods for a transaction have been shipped.
    async fn report_fulfillment(
        &self,
        payload: FulfillmentReportPayload,
        options: RequestOptions,
    ) -> Result<FulfillmentReportSuccess, GatewayError>;

    /// Replaces the billed amount and goods of an existing transaction.
    async fn change_transaction(
        &self,
        payload: ChangeTransactionPayload,
        options: RequestOptions,
    ) -> Result<ChangeTransactionSuccess, GatewayError>;

    /// Voids a transaction outright.
    async fn cancel_transaction(
        &self,
        payload: CancelTransactionPayload,
        options: RequestOptions,
    ) -> Result<CancelTransactionSuccess, GatewayError>;

    /// Checks that the client's credentials are accepted.
    async fn verify_credentials(&self) -> Result<(), GatewayError>;
}

/// Builds a client bound to one merchant's credentials.
pub trait GatewayClientFactory: Send + Sync {
    type Client: GatewayClient;

    fn create(&self, credentials: GatewayCredentials) -> Self::Client;
}
