use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paydesk_grid::config::GridConfig;
use paydesk_grid::data::filter::FilterPredicate;
use paydesk_grid::table::sort_filter::{FilterState, SortFilterEngine};
use paydesk_grid::table::{resolve_columns, SortState, TableController, TableOptions};
use paydesk_grid::{DataRow, Identity};

fn create_transactions(rows: usize) -> Vec<DataRow> {
    let merchants = [
        "Acme Foods",
        "Bolt Cabs",
        "Chai Point",
        "Dosa Corner",
        "Everyday Mart",
        "Fresh Farms",
    ];
    let statuses = ["Successful", "Failed", "Pending", "Refunded", "Successful"];
    let methods = ["UPI", "Card", "Net Banking", "Wallet"];

    (0..rows)
        .map(|i| {
            DataRow::new()
                .with("id", i as i64)
                .with("order_id", format!("ORD-{:06}", i))
                .with("merchant_name", merchants[i % merchants.len()])
                .with("amount", ((i * 7919) % 100_000) as f64 / 100.0)
                .with("payment_method", methods[i % methods.len()])
                .with("status", statuses[i % statuses.len()])
                .with(
                    "created_at",
                    format!("2024-{:02}-{:02}T10:00:00", i % 12 + 1, i % 28 + 1),
                )
        })
        .collect()
}

fn benchmark_sort_filter(c: &mut Criterion) {
    let rows = create_transactions(10_000);
    let identities: Vec<Identity> = (0..rows.len() as i64).map(Identity::Int).collect();
    let columns = resolve_columns("all", "transactions");
    let format = GridConfig::default().format;
    let engine = SortFilterEngine::new(&columns, &format);

    let mut group = c.benchmark_group("sort_filter");

    group.bench_function("filter_status_10k", |b| {
        let filter = FilterState::new().with_filter("status", FilterPredicate::contains("failed"));
        b.iter(|| engine.apply(black_box(&rows), &identities, None, &filter));
    });

    group.bench_function("sort_amount_10k", |b| {
        let sort = SortState::descending("amount");
        let filter = FilterState::new();
        b.iter(|| engine.apply(black_box(&rows), &identities, Some(&sort), &filter));
    });

    group.bench_function("sort_date_10k", |b| {
        let sort = SortState::ascending("created_at");
        let filter = FilterState::new();
        b.iter(|| engine.apply(black_box(&rows), &identities, Some(&sort), &filter));
    });

    group.finish();
}

fn benchmark_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");

    group.bench_function("reorder_10k", |b| {
        let mut controller = TableController::new(
            create_transactions(10_000),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        b.iter(|| {
            controller.reorder(black_box(&Identity::Int(9_999)), black_box(&Identity::Int(0)));
            controller.reorder(black_box(&Identity::Int(0)), black_box(&Identity::Int(9_999)));
        });
    });

    group.bench_function("replace_dataset_10k", |b| {
        let mut controller = TableController::new(
            create_transactions(10_000),
            TableOptions::new("transactions", "all"),
        )
        .unwrap();
        controller.set_filter("status", FilterPredicate::contains("success"));
        let next = create_transactions(10_000);
        b.iter(|| {
            controller.replace_dataset(black_box(next.clone())).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_sort_filter, benchmark_controller);
criterion_main!(benches);
