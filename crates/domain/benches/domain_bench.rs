use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use domain::{OrderSequence, OrderService, ReservationRequest, ReservationService};
use inventory_store::{InMemoryInventoryStore, InventoryRecord};

fn create_store(items: u32) -> InMemoryInventoryStore {
    InMemoryInventoryStore::with_records(
        (1..=items).map(|id| InventoryRecord::new(id, format!("Item {id}"), u32::MAX, 0)),
    )
}

fn bench_reserve_items(c: &mut Criterion) {
    let store = create_store(10);
    let service = ReservationService::new(store);
    let requests: Vec<ReservationRequest> =
        (1..=10).map(|id| ReservationRequest::new(id, 1)).collect();

    c.bench_function("domain/reserve_10_items", |b| {
        b.iter(|| service.reserve_items(&requests).unwrap());
    });
}

fn bench_reserve_with_rollback(c: &mut Criterion) {
    let store = create_store(10);
    store.insert(InventoryRecord::new(11, "Sold out", 0, 0));
    let service = ReservationService::new(store);
    let requests: Vec<ReservationRequest> =
        (1..=11).map(|id| ReservationRequest::new(id, 1)).collect();

    c.bench_function("domain/reserve_10_then_rollback", |b| {
        b.iter(|| service.reserve_items(&requests).unwrap_err());
    });
}

fn bench_place_order(c: &mut Criterion) {
    let service = OrderService::new(
        ReservationService::new(create_store(3)),
        Arc::new(OrderSequence::new()),
    );
    let lines = vec![
        ReservationRequest::new(1, 2),
        ReservationRequest::new(2, 1),
        ReservationRequest::new(3, 5),
    ];

    c.bench_function("domain/place_order", |b| {
        b.iter(|| service.place_order("bench-customer", lines.clone()).unwrap());
    });
}

criterion_group!(
    benches,
    bench_reserve_items,
    bench_reserve_with_rollback,
    bench_place_order
);
criterion_main!(benches);
