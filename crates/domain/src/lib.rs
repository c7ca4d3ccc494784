//! Domain layer for order placement over an inventory store.
//!
//! This crate provides:
//! - [`ReservationService`]: all-or-nothing reservation of several items with
//!   rollback of partial commits
//! - [`OrderService`]: request validation, order identity, and status tracking
//!   on top of the reservation workflow
//!
//! Every operation returns a [`common::Outcome`]; nothing here logs. Failures
//! are enriched or wrapped on their way up and reported once by the caller.

pub mod order;
pub mod reservation;

pub use order::{Order, OrderId, OrderSequence, OrderService, OrderStatus};
pub use reservation::{ReservationRequest, ReservationService};
