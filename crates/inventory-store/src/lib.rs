//! Inventory storage collaborator.
//!
//! The reservation workflow only sees the [`InventoryStore`] trait. The store
//! is shared across calls and is not transactional across items: an
//! implementation deployed behind concurrent callers must make `fetch` and
//! `update` individually safe for concurrent access.

pub mod error;
pub mod memory;
pub mod record;
pub mod store;

pub use error::{Operation, StoreError};
pub use memory::{Fault, InMemoryInventoryStore};
pub use record::{InventoryRecord, ItemId};
pub use store::InventoryStore;
