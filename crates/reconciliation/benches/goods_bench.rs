use common::{ChannelId, Money};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reconciliation::events::{
    ChannelRef, GrantedRefund, GrantedRefundLine, OrderLineRef, SourceLine, SourceObject,
    SourceObjectKind,
};
use reconciliation::refund::{AfterFulfillment, BeforeFulfillment, itemized_goods};

fn make_source_object(line_count: usize) -> SourceObject {
    let lines: Vec<SourceLine> = (0..line_count)
        .map(|i| SourceLine {
            id: format!("line-{i}"),
            sku: Some(format!("SKU-{i:04}")),
            product_name: format!("Product {i}"),
            quantity: 3,
            unit_price: Money::from_minor(1000 + i as i64),
        })
        .collect();
    let total = Money::from_minor(
        lines
            .iter()
            .map(|line| line.unit_price.minor() * i64::from(line.quantity))
            .sum(),
    );

    SourceObject {
        kind: SourceObjectKind::Order,
        id: "order-1".to_string(),
        channel: ChannelRef {
            id: ChannelId::new("channel-1"),
        },
        total,
        lines,
        shipping_price: Some(Money::from_minor(800)),
        discount: Some(Money::from_minor(-500)),
        transactions: Vec::new(),
    }
}

/// Refunds every other line completely.
fn make_granted_refund(line_count: usize) -> GrantedRefund {
    GrantedRefund {
        lines: (0..line_count)
            .step_by(2)
            .map(|i| GrantedRefundLine {
                order_line: OrderLineRef {
                    id: format!("line-{i}"),
                },
                quantity: 3,
            })
            .collect(),
        shipping_costs_included: false,
    }
}

fn bench_itemized_goods(c: &mut Criterion) {
    let mut group = c.benchmark_group("goods/itemized");

    for line_count in [1, 10, 100] {
        let source = make_source_object(line_count);
        let granted = make_granted_refund(line_count);

        group.bench_with_input(
            BenchmarkId::new("before_fulfillment", line_count),
            &line_count,
            |b, _| b.iter(|| itemized_goods::<BeforeFulfillment>(&source, &granted, true)),
        );
        group.bench_with_input(
            BenchmarkId::new("after_fulfillment", line_count),
            &line_count,
            |b, _| b.iter(|| itemized_goods::<AfterFulfillment>(&source, &granted, true)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_itemized_goods);
criterion_main!(benches);
