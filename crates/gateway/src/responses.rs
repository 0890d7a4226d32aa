//! Success responses returned by the gateway.

use common::GatewayTransactionId;
use serde::{Deserialize, Serialize};

use crate::client::RequestOptions;
use crate::error::GatewayError;

/// Per-transaction entry of a fulfillment or cancel response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub np_transaction_id: GatewayTransactionId,
}

/// Per-transaction entry of a change response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTransactionResult {
    pub np_transaction_id: GatewayTransactionId,
    /// Re-authorization outcome code. `"00"` means approved.
    pub authori_result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentReportSuccess {
    pub results: Vec<TransactionResult>,
}

impl FulfillmentReportSuccess {
    /// Id of the first (and normally only) reported transaction.
    pub fn transaction_id(&self) -> Option<&GatewayTransactionId> {
        self.results.first().map(|r| &r.np_transaction_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTransactionSuccess {
    pub results: Vec<ChangeTransactionResult>,
}

impl ChangeTransactionSuccess {
    pub fn transaction_id(&self) -> Option<&GatewayTransactionId> {
        self.results.first().map(|r| &r.np_transaction_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTransactionSuccess {
    pub results: Vec<TransactionResult>,
}

impl CancelTransactionSuccess {
    pub fn transaction_id(&self) -> Option<&GatewayTransactionId> {
        self.results.first().map(|r| &r.np_transaction_id)
    }
}

/// Applies [`RequestOptions`] to the number of results in a response.
///
/// Client implementations call this before handing a response back.
pub fn check_result_count(count: usize, options: RequestOptions) -> Result<(), GatewayError> {
    match count {
        0 => Err(GatewayError::EmptyResults),
        n if n > 1 && options.reject_multiple_results => Err(GatewayError::MultipleResults(n)),
        _ => Ok(()),
    }
}
