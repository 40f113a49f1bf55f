//! Request broker (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                      BROKER                      │
//!   POST /handle          │  ┌──────────┐    ┌──────────┐    ┌────────────┐  │
//!   {action, payload} ────┼─▶│   http   │───▶│ envelope │───▶│  routing   │  │
//!                         │  │  server  │    │  decode  │    │  (action)  │  │
//!                         │  └──────────┘    └──────────┘    └─────┬──────┘  │
//!                         │                                        │         │
//!                         │                                        ▼         │
//!   {error, message,      │  ┌──────────┐                   ┌────────────┐   │     auth /
//!    data} ◀──────────────┼──│ response │◀──────────────────│ downstream │◀──┼───▶ logger
//!                         │  │ envelope │                   │   client   │   │     service
//!                         │  └──────────┘                   └────────────┘   │
//!                         │                                                  │
//!                         │   config · observability · lifecycle             │
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use broker_service::config::{load_config, BrokerConfig};
use broker_service::lifecycle::startup;
use broker_service::observability::logging;

#[derive(Parser)]
#[command(name = "broker-service")]
#[command(about = "Dispatches action envelopes to downstream services", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BrokerConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!("broker-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_size = config.limits.max_body_size,
        downstream_timeout_secs = config.timeouts.downstream_secs,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
