//! The local record of a gateway transaction.

use chrono::{DateTime, Utc};
use common::{GatewayTransactionId, ShippingCompanyCode};
use serde::{Deserialize, Serialize};

/// Links a platform order to its gateway transaction.
///
/// There is exactly one record per order. The gateway transaction id never
/// changes once set; the other fields track what has been reported so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction id issued by the gateway.
    pub gateway_transaction_id: GatewayTransactionId,

    /// Tracking number last reported to the gateway. `None` until the order
    /// has been fulfilled.
    pub tracking_number: Option<String>,

    /// Shipping company code taken from fulfillment metadata, if one was set.
    pub fulfillment_shipping_company_code: Option<ShippingCompanyCode>,

    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Creates a record stamped with the current time.
    pub fn new(
        gateway_transaction_id: GatewayTransactionId,
        tracking_number: Option<String>,
        fulfillment_shipping_company_code: Option<ShippingCompanyCode>,
    ) -> Self {
        Self {
            gateway_transaction_id,
            tracking_number,
            fulfillment_shipping_company_code,
            updated_at: Utc::now(),
        }
    }

    /// Returns true once a fulfillment has been reported for the order.
    pub fn has_reported_fulfillment(&self) -> bool {
        self.tracking_number.is_some()
    }

    /// Folds an incoming update into this stored record.
    ///
    /// Fields present on the update win; absent fields keep the stored value.
    /// The gateway transaction id is never replaced.
    pub fn merge(&self, update: TransactionRecord) -> TransactionRecord {
        TransactionRecord {
            gateway_transaction_id: self.gateway_transaction_id.clone(),
            tracking_number: update.tracking_number.or_else(|| self.tracking_number.clone()),
            fulfillment_shipping_company_code: update
                .fulfillment_shipping_company_code
                .or_else(|| self.fulfillment_shipping_company_code.clone()),
            updated_at: update.updated_at.max(self.updated_at),
        }
    }
}
