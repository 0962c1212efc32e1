//! Round-robin HTTP reverse-proxy load balancer.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               rr-proxy                        │
//!                    │                                               │
//!   Client Request   │  ┌──────────┐   ┌─────────────────────────┐  │
//!   ─────────────────┼─▶│ listener │──▶│ http server + handler   │  │
//!                    │  └──────────┘   └───────────┬─────────────┘  │
//!                    │                             │                │
//!                    │                             ▼                │
//!                    │                  ┌────────────────────┐      │
//!                    │                  │ backend pool       │      │
//!                    │                  │ (round-robin pick) │      │
//!                    │                  └─────────┬──────────┘      │
//!                    │                            │                 │
//!   Client Response  │  ┌──────────┐   ┌──────────▼──────────┐     │
//!   ◀────────────────┼──│  relay   │◀──│ pooled http client  │◀────┼── Backend
//!                    │  └──────────┘   └─────────────────────┘     │
//!                    │                                              │
//!                    │  config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use rr_proxy::config::loader;
use rr_proxy::http::HttpServer;
use rr_proxy::lifecycle::{signals, Shutdown};
use rr_proxy::net::listener;
use rr_proxy::observability::{logging, metrics};

/// Round-robin HTTP reverse-proxy load balancer.
#[derive(Debug, Parser)]
#[command(name = "rr-proxy", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match loader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error}");
            std::process::exit(1);
        }
    };

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backends = config.backends.len(),
        rewrite_host_header = config.forwarding.rewrite_host_header,
        force_close = config.forwarding.force_close,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = listener::bind(&config.listener).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
