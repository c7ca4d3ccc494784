//! Integration tests for reservation and order placement.
//!
//! These tests drive both workflows against the in-memory store and verify
//! the resulting stock levels, including rollback after partial failure.

use std::sync::Arc;

use common::{Diagnostic, OutcomeExt, codes};
use domain::{
    OrderSequence, OrderService, OrderStatus, ReservationRequest, ReservationService,
};
use inventory_store::{
    Fault, InMemoryInventoryStore, InventoryRecord, ItemId, Operation, StoreError,
};
use serde_json::Value;

/// Helper to create a store with a handful of items.
fn create_store() -> InMemoryInventoryStore {
    InMemoryInventoryStore::with_records([
        InventoryRecord::new(1, "Widget", 100, 5),
        InventoryRecord::new(2, "Gadget", 50, 0),
        InventoryRecord::new(3, "Gizmo", 10, 10),
        InventoryRecord::new(4, "Doohickey", 8, 2),
    ])
}

fn reserved(store: &InMemoryInventoryStore, item_id: u32) -> u32 {
    store.get(item_id).unwrap().quantity_reserved
}

fn snapshot(store: &InMemoryInventoryStore) -> Vec<u32> {
    (1..=4).map(|id| reserved(store, id)).collect()
}

mod reservation {
    use super::*;

    #[test]
    fn reserves_in_input_order() {
        let store = create_store();
        let service = ReservationService::new(store.clone());

        let ids = service
            .reserve_items(&[
                ReservationRequest::new(4, 3),
                ReservationRequest::new(1, 10),
                ReservationRequest::new(2, 7),
            ])
            .unwrap();

        assert_eq!(ids, vec![ItemId::new(4), ItemId::new(1), ItemId::new(2)]);
        assert_eq!(snapshot(&store), vec![15, 7, 10, 5]);
    }

    #[test]
    fn second_item_short_rolls_back_first() {
        let store = create_store();
        let service = ReservationService::new(store.clone());

        let d = service
            .reserve_items(&[
                ReservationRequest::new(1, 10),
                ReservationRequest::new(2, 9999),
            ])
            .unwrap_err();

        assert_eq!(d.code(), codes::INSUFFICIENT_INVENTORY);
        assert_eq!(d.get("successfullyReserved"), Some(&Value::from(1)));
        assert_eq!(d.get("attemptedItems"), Some(&Value::from(2)));
        assert_eq!(d.get("failedItemId"), Some(&Value::from(2)));
        assert_eq!(reserved(&store, 1), 5);
        assert_eq!(reserved(&store, 2), 0);
    }

    #[test]
    fn missing_item_after_commits_rolls_back() {
        let store = create_store();
        let service = ReservationService::new(store.clone());

        let d = service
            .reserve_items(&[
                ReservationRequest::new(1, 1),
                ReservationRequest::new(2, 1),
                ReservationRequest::new(99, 1),
            ])
            .unwrap_err();

        assert_eq!(d.code(), codes::ITEM_NOT_FOUND);
        assert_eq!(d.get("successfullyReserved"), Some(&Value::from(2)));
        assert_eq!(snapshot(&store), vec![5, 0, 10, 2]);
        assert_eq!(d.root_cause().code(), codes::ENTITY_NOT_FOUND);
    }

    #[test]
    fn update_failure_rolls_back_earlier_items() {
        let store = create_store();
        store.inject(Fault::on(
            Operation::Update,
            2,
            StoreError::UpdateFailed(ItemId::new(2)),
        ));
        let service = ReservationService::new(store.clone());

        let d = service
            .reserve_items(&[
                ReservationRequest::new(1, 20),
                ReservationRequest::new(2, 1),
            ])
            .unwrap_err();

        assert_eq!(d.code(), codes::UPDATE_FAILED);
        assert_eq!(d.get("successfullyReserved"), Some(&Value::from(1)));
        assert_eq!(reserved(&store, 1), 5);
    }

    #[test]
    fn first_short_item_k_leaves_prefix_untouched() {
        // Item 3 has nothing unreserved; place it at every position k.
        for k in 1..=4usize {
            let store = create_store();
            let service = ReservationService::new(store.clone());
            let before = snapshot(&store);

            let mut requests: Vec<ReservationRequest> = [1, 2, 4]
                .iter()
                .map(|&id| ReservationRequest::new(id, 1))
                .collect();
            requests.insert(k - 1, ReservationRequest::new(3, 1));

            let d = service.reserve_items(&requests).unwrap_err();

            assert_eq!(d.code(), codes::INSUFFICIENT_INVENTORY);
            assert_eq!(
                d.get("successfullyReserved"),
                Some(&Value::from(k - 1)),
                "k = {k}"
            );
            assert_eq!(snapshot(&store), before, "k = {k}");
        }
    }

    #[test]
    fn zero_quantity_lines_succeed_alongside_real_ones() {
        let store = create_store();
        let service = ReservationService::new(store.clone());

        let ids = service
            .reserve_items(&[
                ReservationRequest::new(3, 0),
                ReservationRequest::new(2, 5),
            ])
            .unwrap();

        assert_eq!(ids, vec![ItemId::new(3), ItemId::new(2)]);
        assert_eq!(snapshot(&store), vec![5, 5, 10, 2]);
    }
}

mod order_placement {
    use super::*;

    fn create_service(store: &InMemoryInventoryStore) -> OrderService<InMemoryInventoryStore> {
        OrderService::new(
            ReservationService::new(store.clone()),
            Arc::new(OrderSequence::new()),
        )
    }

    #[test]
    fn confirmed_order_reserves_stock() {
        let store = create_store();
        let service = create_service(&store);

        let order = service
            .place_order(
                "customer-42",
                vec![ReservationRequest::new(1, 10), ReservationRequest::new(2, 3)],
            )
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(order.customer_id(), "customer-42");
        assert_eq!(order.reserved_items(), &[ItemId::new(1), ItemId::new(2)]);
        assert_eq!(reserved(&store, 1), 15);
        assert_eq!(reserved(&store, 2), 3);
    }

    #[test]
    fn failed_order_keeps_full_cause_chain() {
        let store = create_store();
        let service = create_service(&store);

        let d = service
            .place_order(
                "customer-42",
                vec![ReservationRequest::new(1, 10), ReservationRequest::new(2, 9999)],
            )
            .unwrap_err();

        let codes_in_chain: Vec<&str> = d.chain().map(Diagnostic::code).collect();
        assert_eq!(
            codes_in_chain,
            vec![codes::ORDER_FAILED, codes::INSUFFICIENT_INVENTORY]
        );
        assert_eq!(d.get("customerId"), Some(&Value::from("customer-42")));
        assert_eq!(reserved(&store, 1), 5);

        let rendered = d.to_string();
        assert!(rendered.contains("Order 1 could not be placed"));
        assert!(rendered.contains("Insufficient inventory for item 2"));
    }

    #[test]
    fn order_ids_keep_increasing_across_outcomes() {
        let store = create_store();
        let sequence = Arc::new(OrderSequence::new());
        let service = OrderService::new(ReservationService::new(store.clone()), sequence.clone());

        let first = service
            .place_order("c", vec![ReservationRequest::new(2, 1)])
            .map(|o| o.id().get());
        let second = service
            .place_order("c", vec![ReservationRequest::new(3, 1)])
            .fold(|o| o.id().get(), |d| d.get("orderId").and_then(Value::as_u64).unwrap_or(0));
        let third = service
            .place_order("c", vec![ReservationRequest::new(2, 1)])
            .map(|o| o.id().get());

        assert_eq!(first, Ok(1));
        assert_eq!(second, 2);
        assert_eq!(third, Ok(3));
        assert_eq!(sequence.peek().get(), 4);
    }

    #[test]
    fn validation_never_reaches_store() {
        let store = create_store();
        let service = create_service(&store);

        let d = service.place_order("", vec![]).unwrap_err();

        assert_eq!(d.code(), codes::VALIDATION_ERROR);
        assert_eq!(d.get("field"), Some(&Value::from("CustomerId")));
        assert_eq!(store.fetch_count(), 0);
        assert_eq!(store.update_count(), 0);
    }
}
