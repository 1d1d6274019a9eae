use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use storefront_inventory::testkit::ItemBuilder;
use storefront_inventory::Catalog;
use storefront_sales::Order;

/// An order with `lines` lines, each over its own catalog item.
fn populated(lines: usize) -> (Catalog, Order) {
    let mut catalog = Catalog::new();
    let mut order = Order::new(1).expect("valid order id");
    for i in 0..lines {
        let builder = if i % 2 == 0 {
            ItemBuilder::standard().with_discount(0.15)
        } else {
            ItemBuilder::standard().with_discount(12.0)
        };
        let id = builder
            .with_stock(1_000)
            .register(&mut catalog)
            .expect("valid item");
        order
            .add_product(&mut catalog, id, 3)
            .expect("enough stock");
    }
    (catalog, order)
}

fn bench_total(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_total");
    for lines in [10usize, 100, 1_000] {
        let (catalog, order) = populated(lines);
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| black_box(order.total(&catalog).expect("items present")))
        });
    }
    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_summary");
    for lines in [10usize, 100] {
        let (catalog, order) = populated(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, _| {
            b.iter(|| black_box(order.summary(&catalog).expect("items present")))
        });
    }
    group.finish();
}

fn bench_reserve_release(c: &mut Criterion) {
    c.bench_function("add_then_remove_product", |b| {
        let mut catalog = Catalog::new();
        let id = ItemBuilder::standard()
            .with_stock(100)
            .register(&mut catalog)
            .expect("valid item");
        let mut order = Order::new(1).expect("valid order id");
        b.iter(|| {
            order.add_product(&mut catalog, id, 5).expect("enough stock");
            order.remove_product(&mut catalog, id, 5).expect("line present");
        })
    });
}

criterion_group!(benches, bench_total, bench_summary, bench_reserve_release);
criterion_main!(benches);
