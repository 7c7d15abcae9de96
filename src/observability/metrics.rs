//! Metrics collection and exposition.
//!
//! # Metrics
//! - `po_api_requests_total` (counter): requests by endpoint, status
//! - `po_api_request_duration_seconds` (histogram): latency distribution
//! - `po_proposals_built_total` (counter): purchase order proposals constructed
//! - `po_vault_states` (gauge): linear heads held in the vault
//! - `po_network_nodes` (gauge): nodes in the network map
//!
//! Without an installed recorder every call is a no-op, so tests need no setup.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed API request.
pub fn record_request(endpoint: &str, status: u16, start: Instant) {
    metrics::counter!(
        "po_api_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("po_api_request_duration_seconds", "endpoint" => endpoint.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a proposal built by the create endpoint.
pub fn record_proposal() {
    metrics::counter!("po_proposals_built_total").increment(1);
}

pub fn record_vault_size(states: usize) {
    metrics::gauge!("po_vault_states").set(states as f64);
}

pub fn record_network_size(nodes: usize) {
    metrics::gauge!("po_network_nodes").set(nodes as f64);
}
