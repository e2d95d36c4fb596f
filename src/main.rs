//! Pawn shop exchange server (v1)
//!
//! Accepts one offer per TCP connection and decides whether to trade one of
//! the shop's items for it.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────────────┐
//!                  │                        PAWN SHOP                             │
//!                  │                                                              │
//!   Client offer   │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//!   ───────────────┼─▶│   net   │───▶│ protocol │───▶│ routing │───▶│   shop   │  │
//!                  │  │ accept  │    │  decode  │    │  by kind│    │  rules   │  │
//!                  │  └─────────┘    └──────────┘    └─────────┘    └────┬─────┘  │
//!                  │                                                     │        │
//!                  │                                                     ▼        │
//!   Client answer  │  ┌─────────┐    ┌──────────┐                  ┌──────────┐   │
//!   ◀──────────────┼──│   net   │◀───│ protocol │◀─────────────────│inventory │   │
//!                  │  │  reply  │    │  encode  │                  │  swap    │   │
//!                  │  └─────────┘    └──────────┘                  └──────────┘   │
//!                  │                                                              │
//!                  │  ┌────────────────────────────────────────────────────────┐  │
//!                  │  │ config · observability · lifecycle (signals, drain)    │  │
//!                  │  └────────────────────────────────────────────────────────┘  │
//!                  └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use pawnshop::config::loader::read_config;
use pawnshop::config::{validate_config, ConfigError, ShopConfig};
use pawnshop::lifecycle::signals::wait_for_termination;
use pawnshop::observability::{logging, metrics};
use pawnshop::PawnShopServer;

#[derive(Parser)]
#[command(name = "pawnshop")]
#[command(about = "Pawn shop exchange server", long_about = None)]
struct Cli {
    /// Inventory size
    #[arg(long)]
    size: Option<usize>,

    /// Log level or filter directive
    #[arg(long)]
    loglevel: Option<String>,

    /// Listen address (host:port)
    #[arg(long)]
    bind: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<ShopConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ShopConfig::default(),
        };

        if let Some(size) = self.size {
            config.inventory.size = size;
        }
        if let Some(level) = self.loglevel {
            config.observability.log_level = level;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability.log_level)?;
    tracing::info!(
        log_level = %config.observability.log_level,
        bind_address = %config.listener.bind_address,
        inventory_size = config.inventory.size,
        rules = ?config.policy.rules,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let server = Arc::new(PawnShopServer::new(config)?);

    let stopper = Arc::clone(&server);
    tokio::spawn(async move {
        match wait_for_termination().await {
            Ok(signal) => {
                tracing::info!(signal, "Shutdown signal received");
                stopper.stop();
            }
            Err(e) => tracing::error!(error = %e, "Failed to install signal handlers"),
        }
    });

    server.start().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
