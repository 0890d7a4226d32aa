//! In-memory gateway client for tests and local runs.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use common::GatewayTransactionId;
use tokio::sync::RwLock;

use crate::client::{GatewayClient, GatewayClientFactory, RequestOptions};
use crate::credentials::GatewayCredentials;
use crate::error::GatewayError;
use crate::payloads::{CancelTransactionPayload, ChangeTransactionPayload, FulfillmentReportPayload};
use crate::responses::{
    CancelTransactionSuccess, ChangeTransactionResult, ChangeTransactionSuccess,
    FulfillmentReportSuccess, TransactionResult, check_result_count,
};

/// A call received by [`InMemoryGatewayClient`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ReportFulfillment {
        payload: FulfillmentReportPayload,
        options: RequestOptions,
    },
    ChangeTransaction {
        payload: ChangeTransactionPayload,
        options: RequestOptions,
    },
    CancelTransaction {
        payload: CancelTransactionPayload,
        options: RequestOptions,
    },
    VerifyCredentials,
}

#[derive(Debug)]
struct InMemoryGatewayState {
    calls: Vec<GatewayCall>,
    report_failure: Option<GatewayError>,
    change_failure: Option<GatewayError>,
    cancel_failure: Option<GatewayError>,
    credentials_failure: Option<GatewayError>,
    issued_transaction_id: Option<GatewayTransactionId>,
    result_count: usize,
}

impl Default for InMemoryGatewayState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            report_failure: None,
            change_failure: None,
            cancel_failure: None,
            credentials_failure: None,
            issued_transaction_id: None,
            result_count: 1,
        }
    }
}

impl InMemoryGatewayState {
    fn results_for(&self, requested: &GatewayTransactionId) -> Vec<GatewayTransactionId> {
        let id = self
            .issued_transaction_id
            .clone()
            .unwrap_or_else(|| requested.clone());
        vec![id; self.result_count]
    }
}

/// Records every call and answers with configurable outcomes.
///
/// By default every call succeeds with a single result echoing the requested
/// transaction id. Clones share state, so a test can keep a handle while the
/// code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGatewayClient {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryGatewayClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent fulfillment report fail with `error`.
    pub async fn set_report_failure(&self, error: Option<GatewayError>) {
        self.state.write().await.report_failure = error;
    }

    /// Makes every subsequent transaction change fail with `error`.
    pub async fn set_change_failure(&self, error: Option<GatewayError>) {
        self.state.write().await.change_failure = error;
    }

    /// Makes every subsequent cancellation fail with `error`.
    pub async fn set_cancel_failure(&self, error: Option<GatewayError>) {
        self.state.write().await.cancel_failure = error;
    }

    /// Makes credential verification fail with `error`.
    pub async fn set_credentials_failure(&self, error: Option<GatewayError>) {
        self.state.write().await.credentials_failure = error;
    }

    /// Answers with this transaction id instead of echoing the request.
    pub async fn set_issued_transaction_id(&self, id: Option<GatewayTransactionId>) {
        self.state.write().await.issued_transaction_id = id;
    }

    /// Number of transaction results each response carries.
    pub async fn set_result_count(&self, count: usize) {
        self.state.write().await.result_count = count;
    }

    /// Returns all calls received so far.
    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.state.read().await.calls.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.state.read().await.calls.len()
    }
}

#[async_trait]
impl GatewayClient for InMemoryGatewayClient {
    async fn report_fulfillment(
        &self,
        payload: FulfillmentReportPayload,
        options: RequestOptions,
    ) -> Result<FulfillmentReportSuccess, GatewayError> {
        let mut state = self.state.write().await;
        let requested = payload.transactions.first().map(|t| t.np_transaction_id.clone());
        state.calls.push(GatewayCall::ReportFulfillment { payload, options });

        if let Some(error) = state.report_failure.clone() {
            return Err(error);
        }

        let requested = requested.ok_or(GatewayError::EmptyResults)?;
        check_result_count(state.result_count, options)?;
        let results = state
            .results_for(&requested)
            .into_iter()
            .map(|np_transaction_id| TransactionResult { np_transaction_id })
            .collect();

        Ok(FulfillmentReportSuccess { results })
    }

    async fn change_transaction(
        &self,
        payload: ChangeTransactionPayload,
        options: RequestOptions,
    ) -> Result<ChangeTransactionSuccess, GatewayError> {
        let mut state = self.state.write().await;
        let requested = payload.transaction().map(|t| t.np_transaction_id.clone());
        state.calls.push(GatewayCall::ChangeTransaction { payload, options });

        if let Some(error) = state.change_failure.clone() {
            return Err(error);
        }

        let requested = requested.ok_or(GatewayError::EmptyResults)?;
        check_result_count(state.result_count, options)?;
        let results = state
            .results_for(&requested)
            .into_iter()
            .map(|np_transaction_id| ChangeTransactionResult {
                np_transaction_id,
                authori_result: "00".to_string(),
            })
            .collect();

        Ok(ChangeTransactionSuccess { results })
    }

    async fn cancel_transaction(
        &self,
        payload: CancelTransactionPayload,
        options: RequestOptions,
    ) -> Result<CancelTransactionSuccess, GatewayError> {
        let mut state = self.state.write().await;
        let requested = payload.transactions.first().map(|t| t.np_transaction_id.clone());
        state.calls.push(GatewayCall::CancelTransaction { payload, options });

        if let Some(error) = state.cancel_failure.clone() {
            return Err(error);
        }

        let requested = requested.ok_or(GatewayError::EmptyResults)?;
        check_result_count(state.result_count, options)?;
        let results = state
            .results_for(&requested)
            .into_iter()
            .map(|np_transaction_id| TransactionResult { np_transaction_id })
            .collect();

        Ok(CancelTransactionSuccess { results })
    }

    async fn verify_credentials(&self) -> Result<(), GatewayError> {
        let mut state = self.state.write().await;
        state.calls.push(GatewayCall::VerifyCredentials);

        match state.credentials_failure.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Hands out clones of one shared [`InMemoryGatewayClient`].
///
/// The credentials of every `create` call are kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGatewayClientFactory {
    client: InMemoryGatewayClient,
    created_with: Arc<Mutex<Vec<GatewayCredentials>>>,
}

impl InMemoryGatewayClientFactory {
    pub fn new(client: InMemoryGatewayClient) -> Self {
        Self {
            client,
            created_with: Arc::default(),
        }
    }

    /// The shared client every `create` call returns.
    pub fn client(&self) -> &InMemoryGatewayClient {
        &self.client
    }

    /// Credentials passed to `create`, oldest first.
    pub fn created_with(&self) -> Vec<GatewayCredentials> {
        self.created_with
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl GatewayClientFactory for InMemoryGatewayClientFactory {
    type Client = InMemoryGatewayClient;

    fn create(&self, credentials: GatewayCredentials) -> Self::Client {
        tracing::debug!(
            terminal_id = %credentials.terminal_id,
            environment = %credentials.environment,
            "creating in-memory gateway client"
        );
        self.created_with
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(credentials);
        self.client.clone()
    }
}
