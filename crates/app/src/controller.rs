//! Order placement boundary.
//!
//! The controller turns request DTOs into domain calls, collapses the
//! resulting outcome into a response, and emits the one log event per request.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{Diagnostic, OutcomeExt, codes};
use domain::{Order, OrderService, ReservationRequest};
use inventory_store::InventoryStore;
use serde::{Deserialize, Serialize};

use crate::error::LineParseError;
use crate::messages;

// -- Request types --

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer_id: String,
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderLineRequest {
    pub item_id: u32,
    pub quantity: u32,
}

/// Parses `ITEM_ID:QTY`.
impl FromStr for OrderLineRequest {
    type Err = LineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item_id, quantity) = s
            .split_once(':')
            .ok_or_else(|| LineParseError::MissingSeparator(s.to_string()))?;

        Ok(Self {
            item_id: parse_number("item id", item_id)?,
            quantity: parse_number("quantity", quantity)?,
        })
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, LineParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| LineParseError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order_id: u64,
    pub customer_id: String,
    pub status: String,
    pub reserved_items: Vec<u32>,
    pub total_quantity: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id().get(),
            customer_id: order.customer_id().to_string(),
            status: order.status().to_string(),
            reserved_items: order.reserved_items().iter().map(|id| id.get()).collect(),
            total_quantity: order.total_quantity(),
            created_at: order.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PlaceOrderResponse {
    Placed {
        message: String,
        order: OrderResponse,
    },
    Rejected {
        /// Code of the outermost diagnostic.
        code: String,
        /// Code the user message was derived from, if recognised.
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        message: String,
    },
}

impl PlaceOrderResponse {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlaceOrderResponse::Placed { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            PlaceOrderResponse::Placed { message, .. }
            | PlaceOrderResponse::Rejected { message, .. } => message,
        }
    }
}

// -- Controller --

/// Boundary over the order workflow.
pub struct OrderController<S: InventoryStore> {
    orders: OrderService<S>,
}

impl<S: InventoryStore> OrderController<S> {
    pub fn new(orders: OrderService<S>) -> Self {
        Self { orders }
    }

    /// Places an order and reports the result in user-facing terms.
    pub fn place_order(&self, request: PlaceOrderRequest) -> PlaceOrderResponse {
        let lines: Vec<ReservationRequest> = request
            .items
            .iter()
            .map(|line| ReservationRequest::new(line.item_id, line.quantity))
            .collect();

        self.orders
            .place_order(&request.customer_id, lines)
            .fold(placed, rejected)
    }
}

fn placed(order: Order) -> PlaceOrderResponse {
    tracing::info!(
        order_id = %order.id(),
        customer_id = %order.customer_id(),
        items = order.lines().len(),
        "order placed"
    );

    PlaceOrderResponse::Placed {
        message: format!("Order {} confirmed.", order.id()),
        order: OrderResponse::from(&order),
    }
}

fn rejected(diagnostic: Diagnostic) -> PlaceOrderResponse {
    let reason = messages::reason(&diagnostic).map(|d| d.code().to_string());
    let infrastructure = diagnostic.chain().any(|d| codes::is_infrastructure(d.code()));

    if infrastructure {
        tracing::error!(code = diagnostic.code(), reason = ?reason, %diagnostic, "order failed");
    } else {
        tracing::warn!(code = diagnostic.code(), reason = ?reason, %diagnostic, "order rejected");
    }

    PlaceOrderResponse::Rejected {
        code: diagnostic.code().to_string(),
        message: messages::user_message(&diagnostic),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_line() {
        let line: OrderLineRequest = "12:3".parse().unwrap();
        assert_eq!(
            line,
            OrderLineRequest {
                item_id: 12,
                quantity: 3
            }
        );
    }

    #[test]
    fn test_parse_order_line_allows_zero_quantity() {
        let line: OrderLineRequest = "1: 0".parse().unwrap();
        assert_eq!(line.quantity, 0);
    }

    #[test]
    fn test_parse_order_line_errors() {
        assert_eq!(
            "12".parse::<OrderLineRequest>(),
            Err(LineParseError::MissingSeparator("12".to_string()))
        );
        assert_eq!(
            "x:1".parse::<OrderLineRequest>(),
            Err(LineParseError::InvalidNumber {
                field: "item id",
                value: "x".to_string()
            })
        );
        assert!("1:-2".parse::<OrderLineRequest>().is_err());
    }

    #[test]
    fn test_rejected_response_serialization() {
        let response = rejected(Diagnostic::validation("CustomerId", "Customer ID is required"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "result": "rejected",
                "code": "VALIDATION_ERROR",
                "reason": "VALIDATION_ERROR",
                "message": "Customer ID is required"
            })
        );
    }
}
