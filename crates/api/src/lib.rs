//! Webhook server for fulfillment and refund reconciliation.
//!
//! Receives the commerce platform's webhooks, runs them through the
//! reconciliation use cases and maps each outcome to an HTTP status, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use common::AppId;
use gateway::{GatewayClientFactory, InMemoryGatewayClient, InMemoryGatewayClientFactory};
use metrics_exporter_prometheus::PrometheusHandle;
use reconciliation::{
    ChannelConfigSetup, FulfillmentTrackingUseCase, TransactionRefundRequestedUseCase,
};
use store::{
    ChannelConfigRepo, InMemoryChannelConfigRepo, InMemoryTransactionRecordRepo,
    TransactionRecordRepo,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<C, F, T> {
    /// Id of this app installation on the platform.
    pub app_id: AppId,
    pub fulfillment: FulfillmentTrackingUseCase<C, F, T>,
    pub refund: TransactionRefundRequestedUseCase<C, F, T>,
    pub config_setup: ChannelConfigSetup<C, F>,
}

impl<C, F, T> AppState<C, F, T>
where
    C: ChannelConfigRepo + Clone,
    F: GatewayClientFactory + Clone,
    T: TransactionRecordRepo + Clone,
{
    /// Wires every use case to the same adapters.
    pub fn new(app_id: AppId, config_repo: C, client_factory: F, record_repo: T) -> Self {
        Self {
            app_id,
            fulfillment: FulfillmentTrackingUseCase::new(
                config_repo.clone(),
                client_factory.clone(),
                record_repo.clone(),
            ),
            refund: TransactionRefundRequestedUseCase::new(
                config_repo.clone(),
                client_factory.clone(),
                record_repo,
            ),
            config_setup: ChannelConfigSetup::new(config_repo, client_factory),
        }
    }
}

/// State backed by the in-memory adapters.
pub type InMemoryAppState =
    AppState<InMemoryChannelConfigRepo, InMemoryGatewayClientFactory, InMemoryTransactionRecordRepo>;

/// Handles on the in-memory adapters behind [`InMemoryAppState`].
#[derive(Debug, Clone)]
pub struct InMemoryAdapters {
    pub configs: InMemoryChannelConfigRepo,
    pub records: InMemoryTransactionRecordRepo,
    pub gateway: InMemoryGatewayClient,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C, F, T>(state: Arc<AppState<C, F, T>>, metrics_handle: PrometheusHandle) -> Router
where
    C: ChannelConfigRepo + 'static,
    F: GatewayClientFactory + 'static,
    T: TransactionRecordRepo + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/webhooks/fulfillment-tracking-number-updated",
            post(routes::webhooks::fulfillment_tracking_number_updated::<C, F, T>),
        )
        .route(
            "/webhooks/transaction-refund-requested",
            post(routes::webhooks::transaction_refund_requested::<C, F, T>),
        )
        .route(
            "/channels/{channel_id}/config",
            post(routes::channels::create_config::<C, F, T>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over in-memory adapters.
///
/// The gateway client accepts every call; channel configurations start
/// empty and are added through `POST /channels/{channel_id}/config`.
pub fn create_default_state(app_id: AppId) -> (Arc<InMemoryAppState>, InMemoryAdapters) {
    let adapters = InMemoryAdapters {
        configs: InMemoryChannelConfigRepo::new(),
        records: InMemoryTransactionRecordRepo::new(),
        gateway: InMemoryGatewayClient::new(),
    };

    let state = Arc::new(AppState::new(
        app_id,
        adapters.configs.clone(),
        InMemoryGatewayClientFactory::new(adapters.gateway.clone()),
        adapters.records.clone(),
    ));

    (state, adapters)
}
