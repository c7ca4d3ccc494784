//! All-or-nothing reservation of multiple inventory items.

use common::{Diagnostic, Outcome, OutcomeExt, codes, failure, success};
use inventory_store::{InventoryRecord, InventoryStore, ItemId};
use serde::{Deserialize, Serialize};

/// A request to reserve `quantity` units of one item.
///
/// A quantity of zero is accepted and reserves nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl ReservationRequest {
    pub fn new(item_id: u32, quantity: u32) -> Self {
        Self {
            item_id: ItemId::new(item_id),
            quantity,
        }
    }
}

/// Reserves stock against an [`InventoryStore`].
///
/// Requests are processed strictly in order. If any request fails, every
/// reservation already committed by the same call is released before the
/// failure is returned, so callers never observe a half-reserved state.
///
/// Releasing is best effort: a release that itself fails is not propagated,
/// since the original failure is what the caller must see. The number of such
/// failures is recorded under the `rollbackFailures` context key and the
/// `inventory_rollback_failures_total` counter, and the affected stock stays
/// reserved until repaired out of band.
#[derive(Debug, Clone)]
pub struct ReservationService<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> ReservationService<S> {
    /// Creates a new reservation service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reserves every request, or none of them.
    ///
    /// On success returns the reserved item IDs in input order. On failure the
    /// diagnostic is enriched with `attemptedItems`, `successfullyReserved`
    /// and `failedItemId`.
    #[tracing::instrument(skip(self, requests), fields(items = requests.len()))]
    pub fn reserve_items(&self, requests: &[ReservationRequest]) -> Outcome<Vec<ItemId>> {
        if requests.is_empty() {
            return failure(Diagnostic::validation(
                "Items",
                "At least one item must be requested for reservation",
            ));
        }

        metrics::counter!("inventory_reservations_total").increment(1);
        metrics::histogram!("inventory_reservation_items").record(requests.len() as f64);

        let mut committed: Vec<ReservationRequest> = Vec::with_capacity(requests.len());

        for request in requests {
            if let Err(diagnostic) = self.reserve_one(request) {
                metrics::counter!("inventory_reservations_failed_total").increment(1);

                let rollback_failures = self.roll_back(&committed);
                let mut diagnostic = diagnostic
                    .with_context("attemptedItems", requests.len())
                    .with_context("successfullyReserved", committed.len())
                    .with_context("failedItemId", request.item_id);
                if rollback_failures > 0 {
                    diagnostic.set_context("rollbackFailures", rollback_failures);
                }
                return failure(diagnostic);
            }
            committed.push(*request);
        }

        success(committed.iter().map(|r| r.item_id).collect())
    }

    fn reserve_one(&self, request: &ReservationRequest) -> Outcome<()> {
        if request.quantity == 0 {
            return success(());
        }

        self.fetch_item(request.item_id)
            .bind(|record| ensure_available(&record, request).map(|()| record))
            .bind(|record| {
                self.store.update(
                    record.item_id,
                    record.quantity_available,
                    record.quantity_reserved + request.quantity,
                )
            })
    }

    /// Fetches a record, translating a missing row into `ITEM_NOT_FOUND`.
    fn fetch_item(&self, item_id: ItemId) -> Outcome<InventoryRecord> {
        self.store.fetch(item_id).map_err(|d| {
            if d.is(codes::ENTITY_NOT_FOUND) {
                d.wrap(
                    format!("Inventory item {item_id} does not exist"),
                    codes::ITEM_NOT_FOUND,
                )
                .with_context("itemId", item_id)
            } else {
                d
            }
        })
    }

    /// Releases committed reservations, returning how many releases failed.
    fn roll_back(&self, committed: &[ReservationRequest]) -> usize {
        if committed.is_empty() {
            return 0;
        }
        metrics::counter!("inventory_rollbacks_total").increment(1);

        let failed = committed
            .iter()
            .rev()
            .filter(|request| request.quantity > 0)
            .filter(|request| self.release(request).is_err())
            .count();

        if failed > 0 {
            metrics::counter!("inventory_rollback_failures_total").increment(failed as u64);
        }
        failed
    }

    fn release(&self, request: &ReservationRequest) -> Outcome<()> {
        self.store.fetch(request.item_id).bind(|record| {
            self.store.update(
                record.item_id,
                record.quantity_available,
                record.quantity_reserved.saturating_sub(request.quantity),
            )
        })
    }
}

fn ensure_available(record: &InventoryRecord, request: &ReservationRequest) -> Outcome<()> {
    let available = record.unreserved();
    if available < request.quantity {
        return failure(
            Diagnostic::new(
                format!("Insufficient inventory for item {}", request.item_id),
                codes::INSUFFICIENT_INVENTORY,
            )
            .with_context("itemId", request.item_id)
            .with_context("requestedQuantity", request.quantity)
            .with_context("availableQuantity", available),
        );
    }
    success(())
}
