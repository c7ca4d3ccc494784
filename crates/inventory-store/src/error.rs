use common::{Diagnostic, codes};
use thiserror::Error;

use crate::ItemId;

/// Store operation names, used for fault targeting and diagnostic context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Update,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Fetch => "fetch",
            Operation::Update => "update",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when interacting with the inventory store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record exists for the item.
    #[error("Inventory item {0} not found")]
    NotFound(ItemId),

    /// The operation did not complete in time.
    #[error("Store {0} timed out")]
    Timeout(Operation),

    /// The store could not be reached.
    #[error("Store connection unavailable: {0}")]
    Connection(String),

    /// An update matched zero rows.
    #[error("Update of inventory item {0} affected no rows")]
    UpdateFailed(ItemId),

    /// An update would leave more reserved than available.
    #[error(
        "Reserved quantity {reserved} exceeds available quantity {available} for inventory item {item_id}"
    )]
    ConstraintViolation {
        item_id: ItemId,
        available: u32,
        reserved: u32,
    },
}

impl StoreError {
    /// Returns the stable diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => codes::ENTITY_NOT_FOUND,
            StoreError::Timeout(_) => codes::DB_TIMEOUT,
            StoreError::Connection(_) => codes::DB_CONNECTION,
            StoreError::UpdateFailed(_) => codes::UPDATE_FAILED,
            StoreError::ConstraintViolation { .. } => codes::CONSTRAINT_VIOLATION,
        }
    }
}

impl From<StoreError> for Diagnostic {
    fn from(err: StoreError) -> Self {
        let diagnostic = Diagnostic::new(err.to_string(), err.code());
        match err {
            StoreError::NotFound(item_id) | StoreError::UpdateFailed(item_id) => {
                diagnostic.with_context("itemId", item_id)
            }
            StoreError::Timeout(operation) => {
                diagnostic.with_context("operation", operation.as_str())
            }
            StoreError::Connection(_) => diagnostic,
            StoreError::ConstraintViolation {
                item_id,
                available,
                reserved,
            } => diagnostic
                .with_context("itemId", item_id)
                .with_context("quantityAvailable", available)
                .with_context("quantityReserved", reserved),
        }
    }
}
