//! Reports shipped fulfillments to the gateway.

use std::time::Instant;

use common::{ChannelId, GatewayTransactionId, ShippingCompanyCode};
use gateway::{
    FulfillmentReportPayload, GatewayClient, GatewayClientFactory, GatewayError, RequestOptions,
};
use store::{ChannelConfigRepo, RecordScope, TransactionRecord, TransactionRecordRepo};

use crate::channel::load_channel_config;
use crate::events::FulfillmentTrackingNumberUpdatedEvent;
use crate::response::{FulfillmentTrackingResponse, MalformedReason, WebhookRejection};
use crate::validation::single_owned_transaction;

/// The parts of a fulfillment event this use case acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedFulfillmentEvent {
    order_id: String,
    channel_id: ChannelId,
    psp_reference: GatewayTransactionId,
    tracking_number: String,
    metadata_shipping_company_code: Option<ShippingCompanyCode>,
}

fn parse_event(
    event: &FulfillmentTrackingNumberUpdatedEvent,
    scope: &RecordScope,
) -> Result<ParsedFulfillmentEvent, MalformedReason> {
    let order_id = event.order.as_ref().map(|o| o.id.as_str());

    let tracking_number = event
        .fulfillment
        .as_ref()
        .and_then(|f| f.tracking_number.as_deref())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            tracing::warn!(order_id = ?order_id, "fulfillment tracking number is missing");
            MalformedReason::MissingTrackingNumber
        })?;

    let Some(order) = event.order.as_ref() else {
        tracing::warn!("order is missing from fulfillment event");
        return Err(MalformedReason::MissingTransactions);
    };

    let transaction =
        single_owned_transaction(&order.transactions, &scope.app_id).inspect_err(|reason| {
            tracing::warn!(order_id = %order.id, %reason, "rejecting fulfillment event");
        })?;

    let metadata_shipping_company_code = ShippingCompanyCode::from_metadata(
        event
            .fulfillment
            .as_ref()
            .and_then(|f| f.shipping_company_code.as_deref()),
    );

    Ok(ParsedFulfillmentEvent {
        order_id: order.id.clone(),
        channel_id: order.channel.id.clone(),
        psp_reference: GatewayTransactionId::new(transaction.psp_reference.clone()),
        tracking_number: tracking_number.to_string(),
        metadata_shipping_company_code,
    })
}

/// Handles "fulfillment tracking number updated" events.
///
/// Flow: validate the event, resolve the channel's gateway configuration,
/// report the shipment, then record the reported tracking number.
pub struct FulfillmentTrackingUseCase<C, F, T> {
    config_repo: C,
    client_factory: F,
    record_repo: T,
}

impl<C, F, T> FulfillmentTrackingUseCase<C, F, T>
where
    C: ChannelConfigRepo,
    F: GatewayClientFactory,
    T: TransactionRecordRepo,
{
    pub fn new(config_repo: C, client_factory: F, record_repo: T) -> Self {
        Self {
            config_repo,
            client_factory,
            record_repo,
        }
    }

    /// Processes one event.
    ///
    /// A gateway rejection is `Ok(Failure)`: the event was handled, the
    /// platform just needs to learn that the report did not go through.
    #[tracing::instrument(skip(self, event), fields(app_id = %scope.app_id))]
    pub async fn execute(
        &self,
        scope: &RecordScope,
        event: &FulfillmentTrackingNumberUpdatedEvent,
    ) -> Result<FulfillmentTrackingResponse, WebhookRejection> {
        let started = Instant::now();
        let result = self.run(scope, event).await;

        metrics::histogram!("use_case_duration_seconds", "use_case" => "fulfillment_tracking")
            .record(started.elapsed().as_secs_f64());
        match &result {
            Ok(FulfillmentTrackingResponse::Success) => {
                metrics::counter!("fulfillment_reports_total", "outcome" => "success").increment(1);
            }
            Ok(FulfillmentTrackingResponse::Failure(_)) => {
                metrics::counter!("fulfillment_reports_total", "outcome" => "failure").increment(1);
            }
            Err(rejection) => {
                metrics::counter!("webhook_rejections_total", "kind" => rejection.kind())
                    .increment(1);
            }
        }

        result
    }

    async fn run(
        &self,
        scope: &RecordScope,
        event: &FulfillmentTrackingNumberUpdatedEvent,
    ) -> Result<FulfillmentTrackingResponse, WebhookRejection> {
        let parsed = parse_event(event, scope)?;

        let config =
            load_channel_config(&self.config_repo, scope, &parsed.channel_id).await?;
        let client = self.client_factory.create(config.credentials());

        let shipping_company_code = match &parsed.metadata_shipping_company_code {
            Some(code) => {
                tracing::info!(%code, "using shipping company code from fulfillment metadata");
                code.clone()
            }
            None => config.shipping_company_code.clone(),
        };

        let payload = FulfillmentReportPayload::new(
            parsed.tracking_number.clone(),
            parsed.psp_reference.clone(),
            shipping_company_code,
        );

        let reported = client
            .report_fulfillment(payload, RequestOptions::single_result())
            .await
            .and_then(|response| {
                response
                    .transaction_id()
                    .cloned()
                    .ok_or(GatewayError::EmptyResults)
            });

        let gateway_transaction_id = match reported {
            Ok(id) => id,
            Err(error) => {
                tracing::error!(
                    order_id = %parsed.order_id,
                    tracking_number = %parsed.tracking_number,
                    %error,
                    "failed to report fulfillment"
                );
                return Ok(FulfillmentTrackingResponse::Failure(error));
            }
        };

        let record = TransactionRecord::new(
            gateway_transaction_id,
            Some(parsed.tracking_number),
            parsed.metadata_shipping_company_code,
        );

        if let Err(error) = self.record_repo.update_transaction(scope, record).await {
            tracing::error!(order_id = %parsed.order_id, %error, "failed to update transaction record");
            return Err(WebhookRejection::BrokenApp(error));
        }

        tracing::info!(order_id = %parsed.order_id, "fulfillment reported to gateway");
        Ok(FulfillmentTrackingResponse::Success)
    }
}
