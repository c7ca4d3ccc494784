use std::sync::Arc;

use common::Outcome;

use crate::{InventoryRecord, ItemId};

/// Storage contract consumed by the reservation workflow.
///
/// Both operations are synchronous and individually atomic. Nothing spans
/// multiple calls, so a `fetch` followed by an `update` can race with another
/// writer; callers needing atomic read-modify-write must add locking or
/// compare-and-swap at the store level.
pub trait InventoryStore: Send + Sync {
    /// Loads the current record for an item.
    ///
    /// Fails with `ENTITY_NOT_FOUND` when absent, or an infrastructure code
    /// such as `DB_TIMEOUT` / `DB_CONNECTION`.
    fn fetch(&self, item_id: ItemId) -> Outcome<InventoryRecord>;

    /// Overwrites the stock levels of an item.
    ///
    /// Fails with `UPDATE_FAILED` if no record matched.
    fn update(
        &self,
        item_id: ItemId,
        quantity_available: u32,
        quantity_reserved: u32,
    ) -> Outcome<()>;
}

impl<S: InventoryStore + ?Sized> InventoryStore for Arc<S> {
    fn fetch(&self, item_id: ItemId) -> Outcome<InventoryRecord> {
        (**self).fetch(item_id)
    }

    fn update(
        &self,
        item_id: ItemId,
        quantity_available: u32,
        quantity_reserved: u32,
    ) -> Outcome<()> {
        (**self).update(item_id, quantity_available, quantity_reserved)
    }
}
