//! Edge request gate.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                  EDGE GATE                   │
//!  Client Request     │  ┌──────────┐   ┌──────────────────────────┐ │
//!  ───────────────────┼─▶│  bypass  │──▶│ classifier → rate limit  │ │
//!                     │  │  check   │   │      → path filter       │ │
//!                     │  └────┬─────┘   └────────────┬─────────────┘ │
//!                     │       │ static asset          │ forward       │
//!                     │       ▼                       ▼               │
//!  Client Response    │  ┌────────────────────────────────────────┐  │      Host
//!  ◀──────────────────┼──│         upstream forwarder             │◀─┼───▶ Application
//!                     │  └────────────────────────────────────────┘  │
//!                     │                                              │
//!                     │  sweeper · config watcher · admin · metrics  │
//!                     └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use edge_gate::config::{load_config, watcher::ConfigWatcher, EdgeConfig};
use edge_gate::lifecycle::{shutdown_signal, Shutdown};
use edge_gate::observability::{logging, metrics};
use edge_gate::HttpServer;

#[derive(Parser)]
#[command(name = "edge-gate")]
#[command(about = "Admission-control gate in front of the web front end", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("edge-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        window_ms = config.rate_limit.window_ms,
        max_requests = config.rate_limit.max_requests,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher must outlive the server; dropping it stops notifications.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
