//! Order identity generation.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OrderId> for Value {
    fn from(id: OrderId) -> Self {
        Value::from(id.0)
    }
}

/// Monotonically increasing source of order IDs.
///
/// Owned by whoever wires up the order service and shared by reference, so
/// the counter lives for the process and is never reset. Safe to share across
/// threads.
#[derive(Debug)]
pub struct OrderSequence {
    next: AtomicU64,
}

impl OrderSequence {
    /// Creates a sequence whose first ID is 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a sequence whose first ID is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Returns the next ID.
    pub fn next_id(&self) -> OrderId {
        OrderId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the ID the next call to `next_id` will hand out.
    pub fn peek(&self) -> OrderId {
        OrderId(self.next.load(Ordering::Relaxed))
    }
}

impl Default for OrderSequence {
    fn default() -> Self {
        Self::new()
    }
}
