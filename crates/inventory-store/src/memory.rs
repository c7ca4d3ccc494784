use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use common::{Outcome, failure, success};

use crate::{InventoryRecord, InventoryStore, ItemId, Operation, StoreError};

/// A scripted failure for one store operation.
///
/// A fault stays armed once triggered; `after(n)` lets the first `n`
/// matching calls through before it starts failing.
#[derive(Debug, Clone)]
pub struct Fault {
    operation: Operation,
    item_id: Option<ItemId>,
    error: StoreError,
    skip: u32,
}

impl Fault {
    /// Fails `operation` on `item_id` with `error`.
    pub fn on(operation: Operation, item_id: u32, error: StoreError) -> Self {
        Self {
            operation,
            item_id: Some(ItemId::new(item_id)),
            error,
            skip: 0,
        }
    }

    /// Fails `operation` on every item with `error`.
    pub fn on_any(operation: Operation, error: StoreError) -> Self {
        Self {
            operation,
            item_id: None,
            error,
            skip: 0,
        }
    }

    /// Lets `calls` matching calls succeed before failing.
    pub fn after(mut self, calls: u32) -> Self {
        self.skip = calls;
        self
    }

    fn matches(&self, operation: Operation, item_id: ItemId) -> bool {
        self.operation == operation && self.item_id.is_none_or(|id| id == item_id)
    }
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    records: HashMap<ItemId, InventoryRecord>,
    faults: Vec<Fault>,
    fetch_calls: usize,
    update_calls: usize,
}

impl InMemoryInventoryState {
    fn triggered_fault(&mut self, operation: Operation, item_id: ItemId) -> Option<StoreError> {
        let fault = self
            .faults
            .iter_mut()
            .find(|f| f.matches(operation, item_id))?;

        if fault.skip > 0 {
            fault.skip -= 1;
            return None;
        }
        Some(fault.error.clone())
    }
}

/// In-memory inventory store for tests and demos.
///
/// Cloning yields another handle onto the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryStore {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    pub fn with_records(records: impl IntoIterator<Item = InventoryRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Inserts or replaces a record.
    pub fn insert(&self, record: InventoryRecord) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.records.insert(record.item_id, record);
    }

    /// Returns a copy of a record without counting it as a store call.
    pub fn get(&self, item_id: u32) -> Option<InventoryRecord> {
        let state = self.state.read().ok()?;
        state.records.get(&ItemId::new(item_id)).cloned()
    }

    /// Returns the number of records held.
    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Arms a scripted failure.
    pub fn inject(&self, fault: Fault) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.faults.push(fault);
    }

    /// Disarms all scripted failures.
    pub fn clear_faults(&self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.faults.clear();
    }

    /// Returns the number of `fetch` calls made so far.
    pub fn fetch_count(&self) -> usize {
        self.state.read().map(|s| s.fetch_calls).unwrap_or(0)
    }

    /// Returns the number of `update` calls made so far.
    pub fn update_count(&self) -> usize {
        self.state.read().map(|s| s.update_calls).unwrap_or(0)
    }

    fn lock(&self) -> Outcome<std::sync::RwLockWriteGuard<'_, InMemoryInventoryState>> {
        self.state
            .write()
            .map_err(|_| StoreError::Connection("inventory state lock poisoned".to_string()).into())
    }
}

impl InventoryStore for InMemoryInventoryStore {
    #[tracing::instrument(level = "trace", skip(self))]
    fn fetch(&self, item_id: ItemId) -> Outcome<InventoryRecord> {
        let mut state = self.lock()?;
        state.fetch_calls += 1;

        if let Some(error) = state.triggered_fault(Operation::Fetch, item_id) {
            return failure(error.into());
        }

        match state.records.get(&item_id) {
            Some(record) => success(record.clone()),
            None => failure(StoreError::NotFound(item_id).into()),
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn update(
        &self,
        item_id: ItemId,
        quantity_available: u32,
        quantity_reserved: u32,
    ) -> Outcome<()> {
        let mut state = self.lock()?;
        state.update_calls += 1;

        if let Some(error) = state.triggered_fault(Operation::Update, item_id) {
            return failure(error.into());
        }

        if quantity_reserved > quantity_available {
            return failure(
                StoreError::ConstraintViolation {
                    item_id,
                    available: quantity_available,
                    reserved: quantity_reserved,
                }
                .into(),
            );
        }

        let Some(record) = state.records.get_mut(&item_id) else {
            return failure(StoreError::UpdateFailed(item_id).into());
        };
        record.quantity_available = quantity_available;
        record.quantity_reserved = quantity_reserved;
        success(())
    }
}

#[cfg(test)]
mod tests {
    use common::codes;

    use super::*;

    fn widget_store() -> InMemoryInventoryStore {
        InMemoryInventoryStore::with_records([InventoryRecord::new(1, "Widget", 100, 5)])
    }

    #[test]
    fn test_fetch_existing_record() {
        let store = widget_store();
        let record = store.fetch(ItemId::new(1)).unwrap();
        assert_eq!(record.name, "Widget");
        assert_eq!(record.quantity_reserved, 5);
        assert_eq!(store.fetch_count(), 1);
    }

    #[test]
    fn test_fetch_missing_record() {
        let store = widget_store();
        let d = store.fetch(ItemId::new(2)).unwrap_err();
        assert_eq!(d.code(), codes::ENTITY_NOT_FOUND);
    }

    #[test]
    fn test_update_overwrites_levels() {
        let store = widget_store();
        store.update(ItemId::new(1), 100, 15).unwrap();

        let record = store.get(1).unwrap();
        assert_eq!(record.quantity_available, 100);
        assert_eq!(record.quantity_reserved, 15);
        assert_eq!(store.update_count(), 1);
    }

    #[test]
    fn test_update_missing_record_fails() {
        let store = widget_store();
        let d = store.update(ItemId::new(2), 10, 0).unwrap_err();
        assert_eq!(d.code(), codes::UPDATE_FAILED);
    }

    #[test]
    fn test_update_rejects_overreservation() {
        let store = widget_store();
        let d = store.update(ItemId::new(1), 100, 101).unwrap_err();
        assert_eq!(d.code(), codes::CONSTRAINT_VIOLATION);
        assert_eq!(store.get(1).unwrap().quantity_reserved, 5);
    }

    #[test]
    fn test_fault_on_fetch() {
        let store = widget_store();
        store.inject(Fault::on(
            Operation::Fetch,
            1,
            StoreError::Timeout(Operation::Fetch),
        ));

        let d = store.fetch(ItemId::new(1)).unwrap_err();
        assert_eq!(d.code(), codes::DB_TIMEOUT);

        store.clear_faults();
        assert!(store.fetch(ItemId::new(1)).is_ok());
    }

    #[test]
    fn test_fault_after_lets_calls_through() {
        let store = widget_store();
        store.inject(
            Fault::on_any(Operation::Update, StoreError::Connection("reset".into())).after(1),
        );

        assert!(store.update(ItemId::new(1), 100, 6).is_ok());
        let d = store.update(ItemId::new(1), 100, 7).unwrap_err();
        assert_eq!(d.code(), codes::DB_CONNECTION);
        assert_eq!(store.get(1).unwrap().quantity_reserved, 6);
    }

    #[test]
    fn test_fault_only_matches_its_item() {
        let store = InMemoryInventoryStore::with_records([
            InventoryRecord::new(1, "Widget", 10, 0),
            InventoryRecord::new(2, "Gadget", 10, 0),
        ]);
        store.inject(Fault::on(Operation::Fetch, 2, StoreError::NotFound(ItemId::new(2))));

        assert!(store.fetch(ItemId::new(1)).is_ok());
        assert!(store.fetch(ItemId::new(2)).is_err());
    }

    #[test]
    fn test_clones_share_records() {
        let store = widget_store();
        let other = store.clone();
        other.update(ItemId::new(1), 100, 50).unwrap();
        assert_eq!(store.get(1).unwrap().quantity_reserved, 50);
        assert_eq!(store.len(), 1);
    }
}
