//! Gateway error types.

use thiserror::Error;

/// Failures returned by gateway calls.
///
/// A `GatewayError` means the operation was attempted and did not succeed.
/// Callers surface it as a business failure, they do not retry it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The gateway rejected the fulfillment report.
    #[error("Fulfillment report rejected: {0}")]
    FulfillmentReport(String),

    /// The gateway rejected the transaction change.
    #[error("Transaction change rejected: {0}")]
    ChangeTransaction(String),

    /// The gateway rejected the cancellation.
    #[error("Transaction cancellation rejected: {0}")]
    CancelTransaction(String),

    /// The merchant credentials were not accepted.
    #[error("Credentials rejected: {0}")]
    InvalidCredentials(String),

    /// More than one transaction result came back where exactly one was expected.
    #[error("Expected a single transaction result, got {0}")]
    MultipleResults(usize),

    /// The response carried no transaction result at all.
    #[error("Gateway response contained no transaction results")]
    EmptyResults,

    /// The request could not be delivered or the response could not be read.
    #[error("Gateway request failed: {0}")]
    Transport(String),
}
