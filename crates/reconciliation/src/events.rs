//! Webhook payloads delivered by the commerce platform.
//!
//! Shapes mirror the platform's subscription queries: camelCase fields, and
//! the actor that created a transaction tagged by `__typename`. Fields the
//! platform may omit are `Option`s so that validation, not deserialization,
//! decides what is malformed.

use chrono::{DateTime, Utc};
use common::{AppId, ChannelId, Money};
use serde::{Deserialize, Serialize};

/// Who created a platform transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum TransactionCreator {
    /// An app installation.
    App { id: AppId },
    /// A staff user.
    User,
    #[serde(other)]
    Other,
}

/// A payment transaction attached to an order or checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTransaction {
    /// The gateway's transaction id, as stored by the platform.
    pub psp_reference: String,
    #[serde(default)]
    pub created_by: Option<TransactionCreator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: ChannelId,
}

// -- Fulfillment tracking number updated --

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default)]
    pub tracking_number: Option<String>,
    /// Carrier code from the fulfillment's private metadata.
    #[serde(default)]
    pub shipping_company_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrder {
    pub id: String,
    pub channel: ChannelRef,
    #[serde(default)]
    pub transactions: Vec<PlatformTransaction>,
}

/// Sent when a fulfillment's tracking number is set or changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentTrackingNumberUpdatedEvent {
    #[serde(default)]
    pub fulfillment: Option<Fulfillment>,
    #[serde(default)]
    pub order: Option<FulfillmentOrder>,
}

// -- Transaction refund requested --

/// Whether a refund's source object is an order or a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceObjectKind {
    Order,
    Checkout,
}

/// One line of the order or checkout being refunded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLine {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub product_name: String,
    pub quantity: u32,
    /// Gross price of a single unit.
    pub unit_price: Money,
}

/// The order or checkout a transaction belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceObject {
    #[serde(rename = "__typename")]
    pub kind: SourceObjectKind,
    pub id: String,
    pub channel: ChannelRef,
    /// Gross total.
    pub total: Money,
    #[serde(default)]
    pub lines: Vec<SourceLine>,
    /// Gross shipping price.
    #[serde(default)]
    pub shipping_price: Option<Money>,
    /// Applied voucher or discount amount.
    #[serde(default)]
    pub discount: Option<Money>,
    #[serde(default)]
    pub transactions: Vec<PlatformTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantedRefundLine {
    pub order_line: OrderLineRef,
    pub quantity: u32,
}

/// Line-level refund detail computed by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantedRefund {
    #[serde(default)]
    pub lines: Vec<GrantedRefundLine>,
    #[serde(default)]
    pub shipping_costs_included: bool,
}

impl GrantedRefund {
    /// Quantity being refunded for an order line; 0 when the line is not listed.
    pub fn refunded_quantity(&self, order_line_id: &str) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.order_line.id == order_line_id)
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }
}

/// The requested action: how much to refund and in which currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAction {
    pub amount: Money,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundTransaction {
    pub psp_reference: String,
    /// Platform-side transaction token.
    pub token: String,
    #[serde(default)]
    pub source_object: Option<SourceObject>,
}

/// Sent when a refund is requested on a transaction owned by this app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRefundRequestedEvent {
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    pub action: TransactionAction,
    #[serde(default)]
    pub transaction: Option<RefundTransaction>,
    #[serde(default)]
    pub granted_refund: Option<GrantedRefund>,
}
