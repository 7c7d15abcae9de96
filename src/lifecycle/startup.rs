//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the node key and wire the service hub
//! - Start background tasks (signals, config watcher, metrics, admin API)
//! - Bind the API listener and begin accepting traffic
//! - Persist the vault once the server has drained
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::admin::setup_admin_router;
use crate::config::watcher::ConfigWatcher;
use crate::config::NodeConfig;
use crate::http::HttpServer;
use crate::ledger::{LedgerError, NodeKey, ServiceHub, VaultService};
use crate::lifecycle::shutdown::{self, Shutdown};
use crate::lifecycle::signals::spawn_signal_handler;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("config watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid address '{0}'")]
    InvalidAddress(String),
}

/// Run the node until a termination signal arrives.
///
/// `config_path` enables hot reload of the network section when set.
pub async fn run(config: NodeConfig, config_path: Option<PathBuf>) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::InvalidAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let key = NodeKey::load_or_generate()?;
    let (hub, vault) = ServiceHub::from_config(&config, &key)?;

    let shutdown = Shutdown::new();
    let signal_task = spawn_signal_handler(shutdown.clone());

    let (_watcher, config_updates) = match &config_path {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            tracing::info!(path = %path.display(), "Watching config for changes");
            (Some(handle), rx)
        }
        None => (None, mpsc::unbounded_channel().1),
    };

    let server = HttpServer::new(config.clone(), hub);

    let admin_task = if config.admin.enabled {
        let admin_listener = TcpListener::bind(&config.admin.bind_address).await?;
        tracing::info!(address = %admin_listener.local_addr()?, "Admin API listening");
        let app = setup_admin_router(server.state().clone());
        let stop = shutdown.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = axum::serve(admin_listener, app)
                .with_graceful_shutdown(shutdown::wait(stop))
                .await
            {
                tracing::error!(error = %e, "Admin API failed");
            }
        }))
    } else {
        None
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let result = server.run(listener, config_updates, shutdown.subscribe()).await;

    // Release the admin server and signal task if the API stopped on its own.
    shutdown.trigger();
    if let Some(task) = admin_task {
        let _ = task.await;
    }
    signal_task.abort();

    vault.save_to_file()?;
    tracing::info!(states = vault.len(), "Shutdown complete");

    result.map_err(StartupError::from)
}
