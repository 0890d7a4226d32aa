//! Request payloads in the gateway's wire format.
//!
//! Every request wraps a list of transactions, even though this integration
//! only ever sends one per call.

use common::{GatewayTransactionId, Money, ShippingCompanyCode};
use serde::{Deserialize, Serialize};

/// One line of billed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goods {
    pub goods_name: String,
    /// Unit price. Negative prices describe a refund adjustment.
    pub goods_price: Money,
    pub quantity: u32,
}

impl Goods {
    pub fn new(goods_name: impl Into<String>, goods_price: Money, quantity: u32) -> Self {
        Self {
            goods_name: goods_name.into(),
            goods_price,
            quantity,
        }
    }
}

/// Shipment report for a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentReportTransaction {
    pub np_transaction_id: GatewayTransactionId,
    pub pd_company_code: ShippingCompanyCode,
    /// Carrier tracking number.
    pub slip_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentReportPayload {
    pub transactions: Vec<FulfillmentReportTransaction>,
}

impl FulfillmentReportPayload {
    pub fn new(
        tracking_number: impl Into<String>,
        transaction_id: GatewayTransactionId,
        shipping_company_code: ShippingCompanyCode,
    ) -> Self {
        Self {
            transactions: vec![FulfillmentReportTransaction {
                np_transaction_id: transaction_id,
                pd_company_code: shipping_company_code,
                slip_no: tracking_number.into(),
            }],
        }
    }
}

/// New billed amount and goods for an existing transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTransaction {
    pub np_transaction_id: GatewayTransactionId,
    pub billed_amount: Money,
    pub goods: Vec<Goods>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTransactionPayload {
    pub transactions: Vec<ChangeTransaction>,
}

impl ChangeTransactionPayload {
    pub fn new(transaction_id: GatewayTransactionId, billed_amount: Money, goods: Vec<Goods>) -> Self {
        Self {
            transactions: vec![ChangeTransaction {
                np_transaction_id: transaction_id,
                billed_amount,
                goods,
            }],
        }
    }

    /// Returns the single transaction this payload changes.
    pub fn transaction(&self) -> Option<&ChangeTransaction> {
        self.transactions.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTransaction {
    pub np_transaction_id: GatewayTransactionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTransactionPayload {
    pub transactions: Vec<CancelTransaction>,
}

impl CancelTransactionPayload {
    pub fn new(transaction_id: GatewayTransactionId) -> Self {
        Self {
            transactions: vec![CancelTransaction {
                np_transaction_id: transaction_id,
            }],
        }
    }
}
