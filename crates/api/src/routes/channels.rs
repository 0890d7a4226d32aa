//! Channel configuration endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use common::ChannelId;
use gateway::GatewayClientFactory;
use reconciliation::NewChannelConfigInput;
use serde::Serialize;
use store::{ChannelConfig, ChannelConfigRepo, TransactionRecordRepo};

use crate::AppState;
use crate::error::ApiError;
use crate::routes::request_scope;

/// A stored configuration, without the secret code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfigResponse {
    pub channel_id: ChannelId,
    pub name: String,
    pub merchant_code: String,
    pub terminal_id: String,
    pub use_sandbox: bool,
    pub shipping_company_code: String,
    pub sku_as_name: bool,
}

impl ChannelConfigResponse {
    fn new(channel_id: ChannelId, config: ChannelConfig) -> Self {
        Self {
            channel_id,
            name: config.name,
            merchant_code: config.merchant_code,
            terminal_id: config.terminal_id,
            use_sandbox: config.use_sandbox,
            shipping_company_code: config.shipping_company_code.into_inner(),
            sku_as_name: config.sku_as_name,
        }
    }
}

/// POST /channels/{channel_id}/config
#[tracing::instrument(skip(state, headers, input))]
pub async fn create_config<C, F, T>(
    State(state): State<Arc<AppState<C, F, T>>>,
    Path(channel_id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<NewChannelConfigInput>,
) -> Result<(StatusCode, Json<ChannelConfigResponse>), ApiError>
where
    C: ChannelConfigRepo + 'static,
    F: GatewayClientFactory + 'static,
    T: TransactionRecordRepo + 'static,
{
    let scope = request_scope(&headers, &state.app_id)?;
    let channel_id = ChannelId::new(channel_id);

    let config = state
        .config_setup
        .create_config(&scope, &channel_id, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ChannelConfigResponse::new(channel_id, config)),
    ))
}
