//! Order aggregate and placement workflow.

mod aggregate;
mod sequence;
mod service;
mod state;

pub use aggregate::Order;
pub use sequence::{OrderId, OrderSequence};
pub use service::OrderService;
pub use state::OrderStatus;
