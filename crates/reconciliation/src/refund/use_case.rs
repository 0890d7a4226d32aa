use std::time::Instant;

use gateway::GatewayClientFactory;
use store::{ChannelConfigRepo, RecordScope, TransactionRecord, TransactionRecordRepo};

use crate::channel::load_channel_config;
use crate::events::TransactionRefundRequestedEvent;
use crate::response::{RefundResponse, WebhookRejection};

use super::orchestrator::{AfterFulfillmentRefundOrchestrator, BeforeFulfillmentRefundOrchestrator};
use super::parser::parse_refund_event;

/// Handles "transaction refund requested" events.
///
/// The stored transaction record decides the fulfillment phase: once a
/// tracking number has been reported, refunds go through the
/// after-fulfillment orchestrator.
pub struct TransactionRefundRequestedUseCase<C, F, T> {
    config_repo: C,
    client_factory: F,
    record_repo: T,
}

impl<C, F, T> TransactionRefundRequestedUseCase<C, F, T>
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

    #[tracing::instrument(skip(self, event), fields(app_id = %scope.app_id))]
    pub async fn execute(
        &self,
        scope: &RecordScope,
        event: &TransactionRefundRequestedEvent,
    ) -> Result<RefundResponse, WebhookRejection> {
        let started = Instant::now();
        let result = self.run(scope, event).await;

        metrics::histogram!("use_case_duration_seconds", "use_case" => "transaction_refund_requested")
            .record(started.elapsed().as_secs_f64());
        if let Err(rejection) = &result {
            metrics::counter!("webhook_rejections_total", "kind" => rejection.kind()).increment(1);
        }

        result
    }

    async fn run(
        &self,
        scope: &RecordScope,
        event: &TransactionRefundRequestedEvent,
    ) -> Result<RefundResponse, WebhookRejection> {
        let parsed = parse_refund_event(event, &scope.app_id)?;

        let config = load_channel_config(&self.config_repo, scope, &parsed.channel_id).await?;
        let client = self.client_factory.create(config.credentials());

        let existing = self
            .record_repo
            .get_transaction(scope, &parsed.psp_reference)
            .await
            .inspect_err(|error| {
                tracing::error!(
                    psp_reference = %parsed.psp_reference,
                    %error,
                    "failed to load transaction record"
                );
            })?;

        let record = existing.unwrap_or_else(|| {
            tracing::info!(
                psp_reference = %parsed.psp_reference,
                "no transaction record yet, refunding before fulfillment"
            );
            TransactionRecord::new(parsed.psp_reference.clone(), None, None)
        });

        let response = if record.has_reported_fulfillment() {
            AfterFulfillmentRefundOrchestrator::new(client, config.sku_as_name)
                .process_refund(&record.gateway_transaction_id, &parsed)
                .await
        } else {
            BeforeFulfillmentRefundOrchestrator::new(client, config.sku_as_name)
                .process_refund(&record.gateway_transaction_id, &parsed)
                .await
        };

        if !response.is_success() {
            return Ok(response);
        }

        let update = TransactionRecord::new(
            record.gateway_transaction_id.clone(),
            record.tracking_number.clone(),
            record.fulfillment_shipping_company_code.clone(),
        );

        if let Err(error) = self.record_repo.update_transaction(scope, update).await {
            tracing::error!(
                psp_reference = %parsed.psp_reference,
                %error,
                "failed to update transaction record after refund"
            );
            return Err(WebhookRejection::BrokenApp(error));
        }

        tracing::info!(psp_reference = %parsed.psp_reference, "refund processed");
        Ok(response)
    }
}
