//! Platform webhook endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use gateway::GatewayClientFactory;
use reconciliation::{
    FulfillmentTrackingNumberUpdatedEvent, FulfillmentTrackingResponse,
    TransactionRefundRequestedEvent, TransactionResultPayload,
};
use serde::Serialize;
use store::{ChannelConfigRepo, TransactionRecordRepo};

use crate::AppState;
use crate::error::ApiError;
use crate::routes::request_scope;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentWebhookResponse {
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<FulfillmentTrackingResponse> for FulfillmentWebhookResponse {
    fn from(response: FulfillmentTrackingResponse) -> Self {
        match response {
            FulfillmentTrackingResponse::Success => Self {
                result: "success",
                error: None,
            },
            FulfillmentTrackingResponse::Failure(error) => Self {
                result: "failure",
                error: Some(error.to_string()),
            },
        }
    }
}

/// POST /webhooks/fulfillment-tracking-number-updated
///
/// A gateway rejection is acknowledged with 200 and a `failure` body so the
/// platform does not redeliver the event.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn fulfillment_tracking_number_updated<C, F, T>(
    State(state): State<Arc<AppState<C, F, T>>>,
    headers: HeaderMap,
    Json(event): Json<FulfillmentTrackingNumberUpdatedEvent>,
) -> Result<Json<FulfillmentWebhookResponse>, ApiError>
where
    C: ChannelConfigRepo + 'static,
    F: GatewayClientFactory + 'static,
    T: TransactionRecordRepo + 'static,
{
    metrics::counter!("webhooks_received_total", "event" => "fulfillment_tracking_number_updated")
        .increment(1);
    let scope = request_scope(&headers, &state.app_id)?;
    let response = state.fulfillment.execute(&scope, &event).await?;

    Ok(Json(response.into()))
}

/// POST /webhooks/transaction-refund-requested
///
/// Answers with the platform's transaction result body, for both successful
/// and rejected refunds.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn transaction_refund_requested<C, F, T>(
    State(state): State<Arc<AppState<C, F, T>>>,
    headers: HeaderMap,
    Json(event): Json<TransactionRefundRequestedEvent>,
) -> Result<Json<TransactionResultPayload>, ApiError>
where
    C: ChannelConfigRepo + 'static,
    F: GatewayClientFactory + 'static,
    T: TransactionRecordRepo + 'static,
{
    metrics::counter!("webhooks_received_total", "event" => "transaction_refund_requested")
        .increment(1);
    let scope = request_scope(&headers, &state.app_id)?;
    let response = state.refund.execute(&scope, &event).await?;

    Ok(Json(response.to_payload()))
}
