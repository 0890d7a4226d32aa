//! Refund strategy selection and gateway goods derivation.

use common::Money;
use gateway::Goods;

use crate::events::{GrantedRefund, SourceLine, SourceObject};

use super::parser::ParsedRefundEvent;

pub const VOUCHER_GOODS_NAME: &str = "Voucher";
pub const SHIPPING_GOODS_NAME: &str = "Shipping";
/// Name of the single adjustment entry sent when no line detail is known.
pub const REFUND_GOODS_NAME: &str = "Refund";

/// Which gateway operation a refund maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundStrategy<'a> {
    /// Void the whole gateway transaction.
    Cancel,
    /// Amend the billed amount with one synthetic adjustment entry.
    ChangeWithoutLines,
    /// Amend the billed amount and rebuild the goods from the order lines.
    ChangeWithLines(&'a GrantedRefund),
}

impl<'a> RefundStrategy<'a> {
    /// A full refund always cancels, whatever line detail came with it.
    pub fn select(event: &'a ParsedRefundEvent) -> Self {
        if event.is_full_refund() {
            return RefundStrategy::Cancel;
        }
        match &event.granted_refund {
            Some(granted_refund) => RefundStrategy::ChangeWithLines(granted_refund),
            None => RefundStrategy::ChangeWithoutLines,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStrategy::Cancel => "cancel",
            RefundStrategy::ChangeWithoutLines => "change_without_lines",
            RefundStrategy::ChangeWithLines(_) => "change_with_lines",
        }
    }
}

/// Where the order stands relative to shipment when a refund arrives.
///
/// Both phases share the decision tree; they differ only in how itemized
/// goods are derived.
pub trait FulfillmentPhase: Send + Sync + 'static {
    /// Label used in logs and metrics.
    const NAME: &'static str;

    /// Whether a line with nothing left to bill stays in the goods list.
    const KEEPS_SETTLED_LINES: bool;
}

/// No tracking number has been reported yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeforeFulfillment;

impl FulfillmentPhase for BeforeFulfillment {
    const NAME: &'static str = "before_fulfillment";
    const KEEPS_SETTLED_LINES: bool = true;
}

/// The shipment was already reported to the gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct AfterFulfillment;

impl FulfillmentPhase for AfterFulfillment {
    const NAME: &'static str = "after_fulfillment";
    const KEEPS_SETTLED_LINES: bool = false;
}

/// The single entry sent when the platform gave no line detail.
///
/// The price is the negated remaining amount; a negative goods price is how
/// the gateway expresses a refund adjustment.
pub fn refund_adjustment_goods(remaining_amount: Money) -> Vec<Goods> {
    vec![Goods::new(REFUND_GOODS_NAME, -remaining_amount, 1)]
}

fn goods_name(line: &SourceLine, sku_as_name: bool) -> &str {
    match line.sku.as_deref() {
        Some(sku) if sku_as_name && !sku.is_empty() => sku,
        _ => &line.product_name,
    }
}

/// Rebuilds the goods list from the source object after applying the granted
/// refund quantities.
///
/// Order lines come first in their original order, then the voucher entry
/// when a discount exists, then shipping unless the refund already covers it.
pub fn itemized_goods<P: FulfillmentPhase>(
    source_object: &SourceObject,
    granted_refund: &GrantedRefund,
    sku_as_name: bool,
) -> Vec<Goods> {
    let mut goods: Vec<Goods> = source_object
        .lines
        .iter()
        .filter_map(|line| {
            let remaining = line
                .quantity
                .saturating_sub(granted_refund.refunded_quantity(&line.id));

            if remaining == 0 && !P::KEEPS_SETTLED_LINES {
                return None;
            }

            Some(Goods::new(
                goods_name(line, sku_as_name),
                line.unit_price,
                remaining,
            ))
        })
        .collect();

    if let Some(discount) = source_object.discount {
        goods.push(Goods::new(VOUCHER_GOODS_NAME, discount, 1));
    }

    if let Some(shipping) = source_object
        .shipping_price
        .filter(|_| !granted_refund.shipping_costs_included)
    {
        goods.push(Goods::new(SHIPPING_GOODS_NAME, shipping, 1));
    }

    goods
}

#[cfg(test)]
mod tests {
    use common::{ChannelId, GatewayTransactionId};

    use super::*;
    use crate::events::{ChannelRef, GrantedRefundLine, OrderLineRef, SourceObjectKind};

    fn line(id: &str, sku: Option<&str>, quantity: u32, price: i64) -> SourceLine {
        SourceLine {
            id: id.to_string(),
            sku: sku.map(str::to_string),
            product_name: format!("Product {id}"),
            quantity,
            unit_price: Money::from_minor(price),
        }
    }

    fn source_object(lines: Vec<SourceLine>) -> SourceObject {
        SourceObject {
            kind: SourceObjectKind::Order,
            id: "order-1".to_string(),
            channel: ChannelRef {
                id: ChannelId::new("channel-1"),
            },
            total: Money::from_minor(24_031),
            lines,
            shipping_price: Some(Money::from_minor(10_000)),
            discount: Some(Money::from_minor(-419)),
            transactions: Vec::new(),
        }
    }

    fn granted(lines: &[(&str, u32)], shipping_costs_included: bool) -> GrantedRefund {
        GrantedRefund {
            lines: lines
                .iter()
                .map(|(id, quantity)| GrantedRefundLine {
                    order_line: OrderLineRef { id: id.to_string() },
                    quantity: *quantity,
                })
                .collect(),
            shipping_costs_included,
        }
    }

    fn parsed(refunded: i64, total: i64, granted_refund: Option<GrantedRefund>) -> ParsedRefundEvent {
        ParsedRefundEvent {
            refunded_amount: Money::from_minor(refunded),
            source_object_total_amount: Money::from_minor(total),
            remaining_amount: Money::from_minor(total - refunded),
            channel_id: ChannelId::new("channel-1"),
            psp_reference: GatewayTransactionId::new("NP-1"),
            transaction_token: "token-1".to_string(),
            issued_at: "2023-01-01T00:00:00Z".parse().unwrap(),
            granted_refund,
            currency: "JPY".to_string(),
            source_object: source_object(Vec::new()),
        }
    }

    #[test]
    fn test_full_refund_cancels_even_with_lines() {
        assert_eq!(
            RefundStrategy::select(&parsed(2000, 2000, None)),
            RefundStrategy::Cancel
        );
        assert_eq!(
            RefundStrategy::select(&parsed(2000, 2000, Some(granted(&[("line-1", 1)], false)))),
            RefundStrategy::Cancel
        );
    }

    #[test]
    fn test_partial_refund_strategies() {
        assert_eq!(
            RefundStrategy::select(&parsed(1000, 2137, None)),
            RefundStrategy::ChangeWithoutLines
        );
        let with_lines = parsed(1000, 2137, Some(granted(&[], false)));
        assert_eq!(
            RefundStrategy::select(&with_lines),
            RefundStrategy::ChangeWithLines(&granted(&[], false))
        );
    }

    #[test]
    fn test_refund_adjustment_is_negated_remaining_amount() {
        assert_eq!(
            refund_adjustment_goods(Money::from_minor(1137)),
            vec![Goods::new(REFUND_GOODS_NAME, Money::from_minor(-1137), 1)]
        );
    }

    #[test]
    fn test_itemized_goods_with_voucher_and_shipping() {
        let source = source_object(vec![line("line-1", Some("product-sku"), 10, 1445)]);

        let goods =
            itemized_goods::<BeforeFulfillment>(&source, &granted(&[("line-1", 1)], false), true);

        assert_eq!(
            goods,
            vec![
                Goods::new("product-sku", Money::from_minor(1445), 9),
                Goods::new(VOUCHER_GOODS_NAME, Money::from_minor(-419), 1),
                Goods::new(SHIPPING_GOODS_NAME, Money::from_minor(10_000), 1),
            ]
        );
    }

    #[test]
    fn test_shipping_excluded_when_refund_covers_it() {
        let source = source_object(vec![line("line-1", Some("product-sku"), 10, 1445)]);

        let goods =
            itemized_goods::<BeforeFulfillment>(&source, &granted(&[("line-1", 1)], true), true);

        assert!(goods.iter().all(|g| g.goods_name != SHIPPING_GOODS_NAME));
        assert!(goods.iter().any(|g| g.goods_name == VOUCHER_GOODS_NAME));
    }

    #[test]
    fn test_lines_absent_from_refund_keep_full_quantity() {
        let source = source_object(vec![
            line("line-1", None, 2, 500),
            line("line-2", None, 3, 700),
        ]);

        let goods =
            itemized_goods::<BeforeFulfillment>(&source, &granted(&[("line-2", 1)], false), false);

        assert_eq!(goods[0], Goods::new("Product line-1", Money::from_minor(500), 2));
        assert_eq!(goods[1], Goods::new("Product line-2", Money::from_minor(700), 2));
    }

    #[test]
    fn test_settled_lines_kept_before_fulfillment() {
        let source = source_object(vec![
            line("line-1", None, 1, 500),
            line("line-2", None, 1, 700),
        ]);
        let refund = granted(&[("line-1", 1)], false);

        let goods = itemized_goods::<BeforeFulfillment>(&source, &refund, false);

        assert_eq!(goods[0], Goods::new("Product line-1", Money::from_minor(500), 0));
        assert_eq!(goods[1], Goods::new("Product line-2", Money::from_minor(700), 1));
    }

    #[test]
    fn test_settled_lines_dropped_after_fulfillment() {
        let source = source_object(vec![
            line("line-1", None, 1, 500),
            line("line-2", None, 1, 700),
        ]);
        let refund = granted(&[("line-1", 1)], false);

        let goods = itemized_goods::<AfterFulfillment>(&source, &refund, false);

        assert_eq!(
            goods,
            vec![
                Goods::new("Product line-2", Money::from_minor(700), 1),
                Goods::new(VOUCHER_GOODS_NAME, Money::from_minor(-419), 1),
                Goods::new(SHIPPING_GOODS_NAME, Money::from_minor(10_000), 1),
            ]
        );
    }

    #[test]
    fn test_over_refunded_quantity_saturates_at_zero() {
        let source = source_object(vec![line("line-1", None, 1, 500)]);

        let goods =
            itemized_goods::<BeforeFulfillment>(&source, &granted(&[("line-1", 5)], false), false);

        assert_eq!(goods[0].quantity, 0);
    }

    #[test]
    fn test_goods_name_falls_back_to_product_name() {
        let with_sku = line("line-1", Some("product-sku"), 1, 100);
        let blank_sku = line("line-2", Some(""), 1, 100);

        assert_eq!(goods_name(&with_sku, false), "Product line-1");
        assert_eq!(goods_name(&with_sku, true), "product-sku");
        assert_eq!(goods_name(&blank_sku, true), "Product line-2");
    }
}
