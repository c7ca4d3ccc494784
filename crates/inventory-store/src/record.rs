//! Inventory records and identifiers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Returns true for the reserved zero identifier, which never names an item.
    pub fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ItemId> for Value {
    fn from(id: ItemId) -> Self {
        Value::from(id.0)
    }
}

/// Stock levels of a single item as held by the store.
///
/// The store guarantees `quantity_reserved <= quantity_available` after every
/// successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub item_id: ItemId,
    pub name: String,
    pub quantity_available: u32,
    pub quantity_reserved: u32,
}

impl InventoryRecord {
    pub fn new(
        item_id: u32,
        name: impl Into<String>,
        quantity_available: u32,
        quantity_reserved: u32,
    ) -> Self {
        Self {
            item_id: ItemId(item_id),
            name: name.into(),
            quantity_available,
            quantity_reserved,
        }
    }

    /// Quantity that can still be reserved.
    pub fn unreserved(&self) -> u32 {
        self.quantity_available.saturating_sub(self.quantity_reserved)
    }
}
