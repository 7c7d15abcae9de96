//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::NodeConfig;

/// Load the changed file, or `None` if it should not be applied.
///
/// An empty file is the truncation half of a rewrite and is skipped.
fn reload(path: &Path) -> Option<NodeConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => {
            tracing::debug!(path = ?path, "Config file empty, waiting for write");
            return None;
        }
        Ok(content) => content,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read config, keeping current configuration");
            return None;
        }
    };

    tracing::info!(path = ?path, "Config file change detected, reloading");
    match parse_config(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config, keeping current configuration");
            None
        }
    }
}

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<NodeConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<NodeConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        if let Some(new_config) = reload(&path) {
                            let _ = tx.send(new_config);
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}
