//! Order aggregate.

use chrono::{DateTime, Utc};
use common::{Diagnostic, Outcome, codes, failure, success};
use inventory_store::ItemId;
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus};
use crate::reservation::ReservationRequest;

/// An order placed by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    id: OrderId,

    /// Customer who placed the order.
    customer_id: String,

    /// Requested lines, in the order they were submitted.
    lines: Vec<ReservationRequest>,

    /// Item IDs reserved for the order once confirmed.
    #[serde(default)]
    reserved_items: Vec<ItemId>,

    /// Current status of the order.
    status: OrderStatus,

    created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a pending order.
    pub fn new(
        id: OrderId,
        customer_id: impl Into<String>,
        lines: Vec<ReservationRequest>,
    ) -> Self {
        Self {
            id,
            customer_id: customer_id.into(),
            lines,
            reserved_items: Vec::new(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Marks the order confirmed with the items that were reserved for it.
    pub fn confirm(&mut self, reserved_items: Vec<ItemId>) -> Outcome<()> {
        if !self.status.can_confirm() {
            return failure(self.invalid_transition("confirm"));
        }
        self.reserved_items = reserved_items;
        self.status = OrderStatus::Confirmed;
        success(())
    }

    /// Marks the order failed.
    pub fn fail(&mut self) -> Outcome<()> {
        if !self.status.can_fail() {
            return failure(self.invalid_transition("fail"));
        }
        self.status = OrderStatus::Failed;
        success(())
    }

    fn invalid_transition(&self, action: &str) -> Diagnostic {
        Diagnostic::new(
            format!("Cannot {action} order {} from {} status", self.id, self.status),
            codes::INVALID_STATE_TRANSITION,
        )
        .with_context("orderId", self.id)
        .with_context("status", self.status.as_str())
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Returns the requested lines.
    pub fn lines(&self) -> &[ReservationRequest] {
        &self.lines
    }

    /// Returns the reserved item IDs; empty unless confirmed.
    pub fn reserved_items(&self) -> &[ItemId] {
        &self.reserved_items
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
