//! Purchase Order Node
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                   PO NODE                    │
//!                      │                                              │
//!   Client Request     │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!   ───────────────────┼─▶│   net   │───▶│  http   │───▶│   api    │  │
//!                      │  │ tcp/tls │    │ server  │    │ handlers │  │
//!                      │  └─────────┘    └─────────┘    └────┬─────┘  │
//!                      │                                     │        │
//!                      │                                     ▼        │
//!                      │  ┌──────────┐   ┌──────────────────────────┐ │
//!                      │  │ contract │◀──│   ledger (ServiceHub)    │ │
//!                      │  │ PO state │   │ identity · netmap · vault│ │
//!                      │  └──────────┘   └──────────────────────────┘ │
//!                      │                                              │
//!                      │  config · observability · lifecycle · admin  │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use po_node::config::{load_config, NodeConfig};
use po_node::lifecycle::startup;
use po_node::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "po-node")]
#[command(about = "Purchase order ledger node", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => NodeConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        legal_name = %config.node.legal_name,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "po-node starting"
    );

    startup::run(config, args.config).await?;
    Ok(())
}
