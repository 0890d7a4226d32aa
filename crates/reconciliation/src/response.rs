//! Outcomes handed back to the webhook layer.
//!
//! A use case returns `Ok` when the event was processed, whether or not the
//! gateway accepted the operation, and `Err(WebhookRejection)` when it could
//! not be processed at all.

use common::{GatewayTransactionId, Money};
use gateway::GatewayError;
use serde::Serialize;
use store::RecordRepoError;
use thiserror::Error;

/// Why an inbound event is invalid for this integration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("Fulfillment tracking number is missing")]
    MissingTrackingNumber,

    #[error("Order transactions are missing")]
    MissingTransactions,

    /// Goods are reported per transaction, so splitting an order across
    /// several transactions cannot be reconciled.
    #[error("Multiple transactions found for the order ({0})")]
    MultipleTransactions(usize),

    #[error("Transaction was not created by the app")]
    NotCreatedByApp,

    #[error("Transaction was not created by the current app installation")]
    CreatedByOtherInstallation,

    #[error("Event issue time is missing")]
    MissingIssuedAt,

    #[error("Transaction is missing")]
    MissingTransaction,

    #[error("Transaction psp reference is missing")]
    MissingPspReference,

    #[error("Transaction source object is missing")]
    MissingSourceObject,

    /// The refunded transaction is not the one attached to the source object.
    #[error("Refunded transaction {refunded} does not match source object transaction {owned}")]
    TransactionMismatch { refunded: String, owned: String },

    /// Amounts must be non-negative and the refund must fit in the total.
    #[error("Invalid refund amount {refunded} for source object total {total}")]
    InvalidAmount { refunded: Money, total: Money },
}

/// The event could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookRejection {
    /// No usable gateway configuration exists for the channel.
    #[error("App is not configured for this channel")]
    AppIsNotConfigured,

    /// The event itself is invalid. Redelivering it will not help.
    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] MalformedReason),

    /// An internal dependency failed.
    #[error("Broken app: {0}")]
    BrokenApp(#[from] RecordRepoError),
}

impl WebhookRejection {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookRejection::AppIsNotConfigured => "app_not_configured",
            WebhookRejection::MalformedRequest(_) => "malformed_request",
            WebhookRejection::BrokenApp(_) => "broken_app",
        }
    }
}

/// Result of processing a fulfillment tracking number update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillmentTrackingResponse {
    /// The gateway accepted the shipment report and the record was updated.
    Success,
    /// The gateway rejected the shipment report.
    Failure(GatewayError),
}

/// Result type as understood by the platform's transaction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionResultType {
    RefundSuccess,
    RefundFailure,
}

/// Body the platform expects in reply to a synchronous transaction webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResultPayload {
    pub psp_reference: GatewayTransactionId,
    pub result: TransactionResultType,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The gateway applied the refund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundSuccessResult {
    pub psp_reference: GatewayTransactionId,
    pub amount: Money,
}

impl RefundSuccessResult {
    pub fn to_payload(&self) -> TransactionResultPayload {
        TransactionResultPayload {
            psp_reference: self.psp_reference.clone(),
            result: TransactionResultType::RefundSuccess,
            amount: self.amount,
            message: None,
        }
    }
}

/// The gateway rejected the refund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundFailureResult {
    pub psp_reference: GatewayTransactionId,
    pub amount: Money,
    pub error: GatewayError,
}

impl RefundFailureResult {
    pub fn to_payload(&self) -> TransactionResultPayload {
        TransactionResultPayload {
            psp_reference: self.psp_reference.clone(),
            result: TransactionResultType::RefundFailure,
            amount: self.amount,
            message: Some(self.error.to_string()),
        }
    }
}

/// Result of processing a refund request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundResponse {
    Success(RefundSuccessResult),
    Failure(RefundFailureResult),
}

impl RefundResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, RefundResponse::Success(_))
    }

    /// Platform-facing body for this outcome.
    pub fn to_payload(&self) -> TransactionResultPayload {
        match self {
            RefundResponse::Success(result) => result.to_payload(),
            RefundResponse::Failure(result) => result.to_payload(),
        }
    }
}
