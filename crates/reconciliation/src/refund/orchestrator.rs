//! Executes the gateway operation a refund maps to.

use std::marker::PhantomData;

use common::GatewayTransactionId;
use gateway::{
    CancelTransactionPayload, ChangeTransactionPayload, GatewayClient, GatewayError, Goods,
    RequestOptions,
};

use crate::response::{RefundFailureResult, RefundResponse, RefundSuccessResult};

use super::goods::{
    AfterFulfillment, BeforeFulfillment, FulfillmentPhase, RefundStrategy, itemized_goods,
    refund_adjustment_goods,
};
use super::parser::ParsedRefundEvent;

/// Drives one refund through the gateway for a given fulfillment phase.
///
/// The orchestrator never persists anything; recording the outcome is the
/// caller's job.
pub struct RefundOrchestrator<C, P> {
    client: C,
    sku_as_name: bool,
    phase: PhantomData<P>,
}

/// Refunds for orders whose shipment has not been reported yet.
pub type BeforeFulfillmentRefundOrchestrator<C> = RefundOrchestrator<C, BeforeFulfillment>;

/// Refunds for orders already reported as shipped.
pub type AfterFulfillmentRefundOrchestrator<C> = RefundOrchestrator<C, AfterFulfillment>;

impl<C, P> RefundOrchestrator<C, P>
where
    C: GatewayClient,
    P: FulfillmentPhase,
{
    pub fn new(client: C, sku_as_name: bool) -> Self {
        Self {
            client,
            sku_as_name,
            phase: PhantomData,
        }
    }

    /// Picks a strategy for the refund and issues the matching gateway call.
    ///
    /// `transaction_id` is the gateway transaction the refund applies to.
    /// Gateway rejections come back as [`RefundResponse::Failure`]; nothing
    /// here is retried.
    #[tracing::instrument(
        skip(self, event),
        fields(phase = P::NAME, psp_reference = %event.psp_reference)
    )]
    pub async fn process_refund(
        &self,
        transaction_id: &GatewayTransactionId,
        event: &ParsedRefundEvent,
    ) -> RefundResponse {
        let strategy = RefundStrategy::select(event);
        tracing::info!(strategy = strategy.as_str(), "processing refund");

        let outcome = match strategy {
            RefundStrategy::Cancel => self.cancel(transaction_id).await,
            RefundStrategy::ChangeWithoutLines => {
                let goods = refund_adjustment_goods(event.remaining_amount);
                self.change(transaction_id, event, goods).await
            }
            RefundStrategy::ChangeWithLines(granted_refund) => {
                let goods =
                    itemized_goods::<P>(&event.source_object, granted_refund, self.sku_as_name);
                self.change(transaction_id, event, goods).await
            }
        };

        let response = match outcome {
            Ok(issued_id) => RefundResponse::Success(RefundSuccessResult {
                psp_reference: issued_id.unwrap_or_else(|| transaction_id.clone()),
                amount: event.refunded_amount,
            }),
            Err(error) => {
                tracing::error!(strategy = strategy.as_str(), %error, "gateway rejected refund");
                RefundResponse::Failure(RefundFailureResult {
                    psp_reference: transaction_id.clone(),
                    amount: event.refunded_amount,
                    error,
                })
            }
        };

        let outcome_label = if response.is_success() {
            "success"
        } else {
            "failure"
        };
        metrics::counter!(
            "refunds_total",
            "phase" => P::NAME,
            "strategy" => strategy.as_str(),
            "outcome" => outcome_label
        )
        .increment(1);

        response
    }

    async fn cancel(
        &self,
        transaction_id: &GatewayTransactionId,
    ) -> Result<Option<GatewayTransactionId>, GatewayError> {
        let payload = CancelTransactionPayload::new(transaction_id.clone());
        let response = self
            .client
            .cancel_transaction(payload, RequestOptions::single_result())
            .await?;

        Ok(response.transaction_id().cloned())
    }

    async fn change(
        &self,
        transaction_id: &GatewayTransactionId,
        event: &ParsedRefundEvent,
        goods: Vec<Goods>,
    ) -> Result<Option<GatewayTransactionId>, GatewayError> {
        let billed_amount = event.remaining_amount;
        tracing::debug!(%billed_amount, goods = goods.len(), "changing gateway transaction");

        let payload = ChangeTransactionPayload::new(transaction_id.clone(), billed_amount, goods);
        let response = self
            .client
            .change_transaction(payload, RequestOptions::single_result())
            .await?;

        Ok(response.transaction_id().cloned())
    }
}
