//! Stable, machine-readable diagnostic codes.
//!
//! Callers dispatch on these values, never on message text.

/// Caller supplied bad input.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// A requested inventory item does not exist.
pub const ITEM_NOT_FOUND: &str = "ITEM_NOT_FOUND";

/// Not enough unreserved stock to satisfy a reservation.
pub const INSUFFICIENT_INVENTORY: &str = "INSUFFICIENT_INVENTORY";

/// An order could not be placed; the cause carries the reason.
pub const ORDER_FAILED: &str = "ORDER_FAILED";

/// An order status change that the state machine does not allow.
pub const INVALID_STATE_TRANSITION: &str = "INVALID_STATE_TRANSITION";

/// Store: the referenced entity is absent.
pub const ENTITY_NOT_FOUND: &str = "ENTITY_NOT_FOUND";

/// Store: the operation timed out.
pub const DB_TIMEOUT: &str = "DB_TIMEOUT";

/// Store: the connection is unavailable.
pub const DB_CONNECTION: &str = "DB_CONNECTION";

/// Store: an update affected zero rows.
pub const UPDATE_FAILED: &str = "UPDATE_FAILED";

/// Store: an update would break a record invariant.
pub const CONSTRAINT_VIOLATION: &str = "CONSTRAINT_VIOLATION";

/// Codes raised by the storage layer that a surrounding policy may retry.
pub const INFRASTRUCTURE: &[&str] = &[
    DB_TIMEOUT,
    DB_CONNECTION,
    UPDATE_FAILED,
    CONSTRAINT_VIOLATION,
];

/// Returns true if `code` denotes an infrastructure failure.
pub fn is_infrastructure(code: &str) -> bool {
    INFRASTRUCTURE.contains(&code)
}
