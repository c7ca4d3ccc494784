//! Command-line boundary for order placement.
//!
//! Wires the order workflow to a store, translates diagnostics into user
//! messages, and owns logging and metrics setup. This is the only layer that
//! logs.

pub mod config;
pub mod controller;
pub mod error;
pub mod messages;
pub mod seed;

use std::sync::Arc;

use domain::{OrderSequence, OrderService, ReservationService};
use inventory_store::InventoryStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use config::{Config, LogFormat};
pub use controller::{OrderController, OrderLineRequest, PlaceOrderRequest, PlaceOrderResponse};
pub use error::{ConfigError, LineParseError};

/// Creates a controller over `store` with a fresh order sequence.
pub fn create_controller<S: InventoryStore>(store: S) -> OrderController<S> {
    create_controller_with_sequence(store, Arc::new(OrderSequence::new()))
}

/// Creates a controller over `store` drawing order IDs from `sequence`.
pub fn create_controller_with_sequence<S: InventoryStore>(
    store: S,
    sequence: Arc<OrderSequence>,
) -> OrderController<S> {
    OrderController::new(OrderService::new(ReservationService::new(store), sequence))
}

/// Installs the global tracing subscriber. Logs go to stderr.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
