//! Demo inventory for the command-line boundary.

use inventory_store::{InMemoryInventoryStore, InventoryRecord};

/// Records the demo store starts with.
pub fn demo_records() -> Vec<InventoryRecord> {
    vec![
        InventoryRecord::new(1, "Mechanical keyboard", 100, 5),
        InventoryRecord::new(2, "USB-C cable", 250, 40),
        InventoryRecord::new(3, "27\" monitor", 12, 12),
        InventoryRecord::new(4, "Laptop stand", 30, 0),
        InventoryRecord::new(5, "Webcam", 8, 3),
    ]
}

/// Creates an in-memory store holding [`demo_records`].
pub fn demo_store() -> InMemoryInventoryStore {
    InMemoryInventoryStore::with_records(demo_records())
}
