//! `place-order` entry point.

use std::process::ExitCode;

use app::{Config, OrderLineRequest, PlaceOrderRequest};
use clap::Parser;

/// Place an order against the demo inventory.
#[derive(Debug, Parser)]
#[command(name = "place-order", version)]
struct Cli {
    /// Customer placing the order.
    #[arg(long, default_value = "")]
    customer: String,

    /// Order line as ITEM_ID:QTY; repeat for several items.
    #[arg(long = "item", value_name = "ITEM_ID:QTY")]
    items: Vec<OrderLineRequest>,

    /// Print the demo inventory after the order is processed.
    #[arg(long)]
    show_inventory: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::from(2);
        }
    };

    // 2. Initialize tracing
    app::init_tracing(&config);

    // 3. Install Prometheus metrics recorder
    let metrics_handle = if config.metrics {
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "failed to install Prometheus recorder");
                None
            }
        }
    } else {
        None
    };

    // 4. Place the order
    let store = app::seed::demo_store();
    let controller = app::create_controller(store.clone());
    let response = controller.place_order(PlaceOrderRequest {
        customer_id: cli.customer,
        items: cli.items,
    });

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to encode response: {e}");
            return ExitCode::FAILURE;
        }
    }

    if cli.show_inventory {
        let mut records: Vec<_> = app::seed::demo_records()
            .into_iter()
            .filter_map(|r| store.get(r.item_id.get()))
            .collect();
        records.sort_by_key(|r| r.item_id);
        if let Ok(json) = serde_json::to_string_pretty(&records) {
            println!("{json}");
        }
    }

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    if response.is_placed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
