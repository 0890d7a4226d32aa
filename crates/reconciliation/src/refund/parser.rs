//! Normalizes refund-requested events.

use chrono::{DateTime, Utc};
use common::{AppId, ChannelId, GatewayTransactionId, Money};

use crate::events::{GrantedRefund, SourceObject, TransactionRefundRequestedEvent};
use crate::response::MalformedReason;
use crate::validation::single_owned_transaction;

/// A refund request that passed validation, flattened for the orchestrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRefundEvent {
    pub refunded_amount: Money,
    pub source_object_total_amount: Money,
    /// `source_object_total_amount - refunded_amount`, never negative.
    pub remaining_amount: Money,
    pub channel_id: ChannelId,
    /// Gateway transaction the refund applies to.
    pub psp_reference: GatewayTransactionId,
    /// Platform-side transaction token.
    pub transaction_token: String,
    pub issued_at: DateTime<Utc>,
    /// Present only when the platform computed line-level refund detail.
    pub granted_refund: Option<GrantedRefund>,
    pub currency: String,
    pub source_object: SourceObject,
}

impl ParsedRefundEvent {
    /// True when the whole source object total is being refunded.
    pub fn is_full_refund(&self) -> bool {
        self.refunded_amount == self.source_object_total_amount
    }
}

/// Amount left to bill, or `None` unless `0 <= refunded <= total`.
fn amount_left_to_bill(refunded: Money, total: Money) -> Option<Money> {
    if refunded.is_negative() || total.is_negative() {
        return None;
    }
    total.checked_sub(refunded).filter(|remaining| !remaining.is_negative())
}

/// Validates a raw refund event and flattens it.
///
/// Ownership rules are the same as for fulfillment events: the source object
/// must carry exactly one transaction, created by this app installation. That
/// transaction must also be the one being refunded.
pub fn parse_refund_event(
    event: &TransactionRefundRequestedEvent,
    app_id: &AppId,
) -> Result<ParsedRefundEvent, MalformedReason> {
    let issued_at = event.issued_at.ok_or_else(|| {
        tracing::warn!("refund event has no issue time");
        MalformedReason::MissingIssuedAt
    })?;

    let Some(transaction) = event.transaction.as_ref() else {
        tracing::warn!("refund event has no transaction");
        return Err(MalformedReason::MissingTransaction);
    };

    if transaction.psp_reference.is_empty() {
        tracing::warn!(token = %transaction.token, "refund transaction has no psp reference");
        return Err(MalformedReason::MissingPspReference);
    }

    let Some(source_object) = transaction.source_object.as_ref() else {
        tracing::warn!(
            psp_reference = %transaction.psp_reference,
            "refund transaction has no source object"
        );
        return Err(MalformedReason::MissingSourceObject);
    };

    let owned = single_owned_transaction(&source_object.transactions, app_id).inspect_err(
        |reason| {
            tracing::warn!(
                source_object_id = %source_object.id,
                %reason,
                "rejecting refund event"
            );
        },
    )?;

    if owned.psp_reference != transaction.psp_reference {
        tracing::warn!(
            refunded = %transaction.psp_reference,
            owned = %owned.psp_reference,
            "refunded transaction is not the source object's transaction"
        );
        return Err(MalformedReason::TransactionMismatch {
            refunded: transaction.psp_reference.clone(),
            owned: owned.psp_reference.clone(),
        });
    }

    let refunded_amount = event.action.amount;
    let total = source_object.total;
    let remaining_amount = amount_left_to_bill(refunded_amount, total).ok_or_else(|| {
        tracing::warn!(%refunded_amount, %total, "refund amount out of range");
        MalformedReason::InvalidAmount {
            refunded: refunded_amount,
            total,
        }
    })?;

    Ok(ParsedRefundEvent {
        refunded_amount,
        source_object_total_amount: total,
        remaining_amount,
        channel_id: source_object.channel.id.clone(),
        psp_reference: GatewayTransactionId::new(transaction.psp_reference.clone()),
        transaction_token: transaction.token.clone(),
        issued_at,
        granted_refund: event.granted_refund.clone(),
        currency: event.action.currency.clone(),
        source_object: source_object.clone(),
    })
}
