//! Order placement workflow.

use std::sync::Arc;

use common::{Diagnostic, Outcome, OutcomeExt, codes, failure, success};
use inventory_store::InventoryStore;

use super::{Order, OrderSequence};
use crate::reservation::{ReservationRequest, ReservationService};

/// Service for placing orders.
///
/// Validates the request, assigns an order ID, and reserves stock for every
/// line through the [`ReservationService`]. A reservation failure is wrapped in
/// an `ORDER_FAILED` diagnostic that keeps the reservation diagnostic as its
/// cause.
pub struct OrderService<S: InventoryStore> {
    reservations: ReservationService<S>,
    sequence: Arc<OrderSequence>,
}

impl<S: InventoryStore> OrderService<S> {
    /// Creates a new order service drawing IDs from `sequence`.
    pub fn new(reservations: ReservationService<S>, sequence: Arc<OrderSequence>) -> Self {
        Self {
            reservations,
            sequence,
        }
    }

    /// Returns a reference to the underlying reservation service.
    pub fn reservations(&self) -> &ReservationService<S> {
        &self.reservations
    }

    /// Places an order for `customer_id`.
    ///
    /// Validation failures return before an order ID is assigned and never
    /// touch the store.
    #[tracing::instrument(skip(self, items), fields(items = items.len()))]
    pub fn place_order(&self, customer_id: &str, items: Vec<ReservationRequest>) -> Outcome<Order> {
        validate(customer_id, &items)
            .map(|()| Order::new(self.sequence.next_id(), customer_id, items))
            .bind(|order| self.reserve(order))
    }

    fn reserve(&self, mut order: Order) -> Outcome<Order> {
        match self.reservations.reserve_items(order.lines()) {
            Ok(reserved_items) => {
                order.confirm(reserved_items)?;
                metrics::counter!("orders_placed_total").increment(1);
                success(order)
            }
            Err(cause) => {
                metrics::counter!("orders_failed_total").increment(1);
                failure(order_failed(&mut order, cause))
            }
        }
    }
}

/// Marks `order` failed and wraps the reservation diagnostic in `ORDER_FAILED`.
///
/// A rejected status transition is recorded as context on the wrapper so the
/// reservation diagnostic stays the cause.
fn order_failed(order: &mut Order, cause: Diagnostic) -> Diagnostic {
    let transition = order.fail().err();

    let diagnostic = cause
        .wrap(format!("Order {} could not be placed", order.id()), codes::ORDER_FAILED)
        .with_context("orderId", order.id())
        .with_context("customerId", order.customer_id())
        .with_context("status", order.status().as_str());

    match transition {
        Some(transition) => diagnostic.with_context("transitionError", transition.to_string()),
        None => diagnostic,
    }
}

fn validate(customer_id: &str, items: &[ReservationRequest]) -> Outcome<()> {
    if customer_id.trim().is_empty() {
        return failure(Diagnostic::validation("CustomerId", "Customer ID is required"));
    }

    if items.is_empty() {
        return failure(Diagnostic::validation("Items", "Order must contain at least one item"));
    }

    if let Some(index) = items.iter().position(|line| line.item_id.is_unassigned()) {
        return failure(
            Diagnostic::validation("ItemId", "Item ID must be greater than zero")
                .with_context("index", index),
        );
    }

    success(())
}
